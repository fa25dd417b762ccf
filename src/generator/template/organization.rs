use serde::Serialize;

/// 案例分析中的客户组织画像
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrganizationProfile {
    Fortune500Manufacturer,
    RegionalHealthcareSystem,
    GrowingTechnologyCompany,
    FinancialServicesFirm,
}

/// 模板中 `organization.*` 可用的字段
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrganizationFacts {
    pub label: &'static str,
    pub industry: &'static str,
    pub employees: &'static str,
    pub revenue: &'static str,
}

impl OrganizationProfile {
    pub const ALL: [OrganizationProfile; 4] = [
        OrganizationProfile::Fortune500Manufacturer,
        OrganizationProfile::RegionalHealthcareSystem,
        OrganizationProfile::GrowingTechnologyCompany,
        OrganizationProfile::FinancialServicesFirm,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OrganizationProfile::Fortune500Manufacturer => "Fortune 500 manufacturer",
            OrganizationProfile::RegionalHealthcareSystem => "Regional healthcare system",
            OrganizationProfile::GrowingTechnologyCompany => "Growing technology company",
            OrganizationProfile::FinancialServicesFirm => "Financial services firm",
        }
    }

    pub fn industry(&self) -> &'static str {
        match self {
            OrganizationProfile::Fortune500Manufacturer => "Manufacturing",
            OrganizationProfile::RegionalHealthcareSystem => "Healthcare",
            OrganizationProfile::GrowingTechnologyCompany => "Technology",
            OrganizationProfile::FinancialServicesFirm => "Financial Services",
        }
    }

    pub fn employees(&self) -> &'static str {
        match self {
            OrganizationProfile::Fortune500Manufacturer => "15,000+ employees",
            OrganizationProfile::RegionalHealthcareSystem => "5,000+ employees",
            _ => "500+ employees",
        }
    }

    pub fn revenue(&self) -> &'static str {
        match self {
            OrganizationProfile::Fortune500Manufacturer => "$5B+ annually",
            OrganizationProfile::RegionalHealthcareSystem => "$1B+ annually",
            _ => "$100M+ annually",
        }
    }

    pub fn facts(&self) -> OrganizationFacts {
        OrganizationFacts {
            label: self.label(),
            industry: self.industry(),
            employees: self.employees(),
            revenue: self.revenue(),
        }
    }
}
