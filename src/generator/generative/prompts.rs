use super::SectionSlot;

/// 为每个段落构造提示词
pub fn section_prompt(slot: SectionSlot, topic: &str, headline: &str) -> String {
    match slot {
        SectionSlot::Title => format!(
            "Write one concise, compelling title for a cybersecurity blog post about {topic}. \
             Reply with the title only, without quotes."
        ),
        SectionSlot::Introduction => format!(
            "Write an engaging two-paragraph introduction for a cybersecurity blog post about {topic}. \
             Open by relating it to this recent development: \"{headline}\"."
        ),
        SectionSlot::Facts => format!(
            "List the key facts, figures and industry trends security leaders should know about {topic}. \
             Use a short Markdown bullet list."
        ),
        SectionSlot::Analysis => format!(
            "Provide an expert analysis of {topic}: the main risks, the implementation challenges \
             and the strategic implications for organizations of different sizes."
        ),
        SectionSlot::Conclusion => format!(
            "Write a concluding paragraph for a cybersecurity blog post about {topic} \
             that summarizes the argument and gives security leaders clear next steps."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_prompt_mentions_topic() {
        for slot in SectionSlot::ALL {
            let prompt = section_prompt(slot, "Data Loss Prevention", "Headline");
            assert!(prompt.contains("Data Loss Prevention"), "{:?}", slot);
        }
    }

    #[test]
    fn test_only_introduction_uses_headline() {
        let headline = "Supply chain attacks increase by 40% this quarter";
        for slot in SectionSlot::ALL {
            let prompt = section_prompt(slot, "Supply Chain Security", headline);
            assert_eq!(prompt.contains(headline), slot == SectionSlot::Introduction);
        }
    }
}
