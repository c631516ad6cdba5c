//! Researcher profile update builder.

/// Fields to change on a researcher; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ResearcherUpdate {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub institution: Option<String>,
    pub country: Option<String>,
    pub research_interests: Option<Vec<String>>,
    pub availability: Option<bool>,
    pub orcid_link: Option<String>,
    pub researchgate_link: Option<String>,
}

impl ResearcherUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.specialization.is_none()
            && self.institution.is_none()
            && self.country.is_none()
            && self.research_interests.is_none()
            && self.availability.is_none()
            && self.orcid_link.is_none()
            && self.researchgate_link.is_none()
    }
}

pub struct ResearcherUpdateBuilder(ResearcherUpdate);

impl ResearcherUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ResearcherUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn specialization(mut self, specialization: impl Into<String>) -> Self {
        self.0.specialization = Some(specialization.into());
        self
    }

    #[must_use]
    pub fn institution(mut self, institution: impl Into<String>) -> Self {
        self.0.institution = Some(institution.into());
        self
    }

    #[must_use]
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.0.country = Some(country.into());
        self
    }

    #[must_use]
    pub fn research_interests(mut self, interests: Vec<String>) -> Self {
        self.0.research_interests = Some(interests);
        self
    }

    #[must_use]
    pub const fn availability(mut self, availability: bool) -> Self {
        self.0.availability = Some(availability);
        self
    }

    #[must_use]
    pub fn orcid_link(mut self, link: impl Into<String>) -> Self {
        self.0.orcid_link = Some(link.into());
        self
    }

    #[must_use]
    pub fn researchgate_link(mut self, link: impl Into<String>) -> Self {
        self.0.researchgate_link = Some(link.into());
        self
    }

    #[must_use]
    pub fn build(self) -> ResearcherUpdate {
        self.0
    }
}

impl Default for ResearcherUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
