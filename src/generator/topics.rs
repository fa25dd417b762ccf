//! 固定的主题与新闻素材

/// 可选的博客主题
pub const TOPICS: &[&str] = &[
    "Zero Trust Architecture Implementation",
    "Cloud Security Best Practices",
    "Incident Response Planning",
    "Ransomware Defense Strategies",
    "AI in Cybersecurity",
    "Supply Chain Security",
    "Identity and Access Management",
    "Threat Hunting Techniques",
    "Security Awareness Training",
    "Compliance and Governance",
    "DevSecOps Integration",
    "Network Security Monitoring",
    "Vulnerability Management",
    "Data Loss Prevention",
    "Endpoint Detection and Response",
    "Security Orchestration and Automation",
    "Penetration Testing Methodologies",
    "Cyber Threat Intelligence",
    "Security Architecture Design",
    "Risk Assessment Frameworks",
];

/// 近期行业动态，作为生成式管线引言段落的灵感素材
pub const HEADLINES: &[&str] = &[
    "Major ransomware attack targets healthcare sector",
    "New zero-day vulnerability discovered in popular software",
    "AI-powered security tools show promising results",
    "Regulatory changes affect data protection requirements",
    "Supply chain attacks increase by 40% this quarter",
];

/// 按名称查找主题（忽略大小写），返回列表中的规范写法
pub fn find_topic(name: &str) -> Option<&'static str> {
    let wanted = name.trim();
    TOPICS
        .iter()
        .copied()
        .find(|topic| topic.eq_ignore_ascii_case(wanted))
}
