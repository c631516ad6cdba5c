//! Shared test utilities for cura-db tests.

pub(crate) mod helpers {
    use cura_config::GeneralConfig;

    use crate::CuraDb;
    use crate::repos::researcher::NewResearcher;
    use crate::service::CuraService;

    /// In-memory service with default limits.
    pub async fn test_service() -> CuraService {
        let db = CuraDb::open_local(":memory:").await.unwrap();
        CuraService::from_db(db, GeneralConfig::default())
    }

    /// Create a researcher with the given name and specialization; returns its ID.
    pub async fn seed_researcher(svc: &CuraService, name: &str, specialization: &str) -> String {
        let new = NewResearcher {
            name: name.into(),
            email: format!("{}@example.org", name.to_lowercase().replace(' ', ".")),
            specialization: specialization.into(),
            ..NewResearcher::default()
        };
        svc.setup_researcher(&new).await.unwrap().id
    }
}
