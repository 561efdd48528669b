//! Commands shipped with the bot, one unit per module.

use cmdisco_model::ConfigError;
use log::error;

use crate::router::{Router, Unit};

mod admin;
mod extra;
mod general;

pub fn all() -> Vec<Unit> {
    vec![general::unit(), extra::unit(), admin::unit()]
}

/// Loads every unit, stopping at the first one that fails to register.
pub async fn load_all(router: &Router) -> Result<(), ConfigError> {
    for unit in all() {
        let key = unit.key().clone();
        router
            .load_unit(unit)
            .await
            .inspect_err(|e| error!("Failed to load unit {key}: {e}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use cmdisco_model::UnitKey;

    use super::*;
    use crate::router::testing::router;

    #[tokio::test]
    async fn all_units_load() {
        let router = router(Default::default());
        load_all(&router).await.unwrap();
        assert_eq!(
            router.unit_keys().await,
            [
                UnitKey::from("general"),
                UnitKey::from("extra"),
                UnitKey::from("admin")
            ]
        );
        assert!(router.unit_sizes().await.iter().all(|(_, size)| *size > 0));
    }

    #[tokio::test]
    async fn loading_twice_fails() {
        let router = router(Default::default());
        load_all(&router).await.unwrap();
        assert_eq!(
            load_all(&router).await,
            Err(ConfigError::UnitAlreadyLoaded(UnitKey::from("general")))
        );
    }
}
