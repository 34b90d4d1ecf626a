use std::sync::Arc;
use hospital_directory::{config::StorageBackend, Config};
use tokio::sync::OnceCell;

static SHARED: OnceCell<Arc<SharedTestResources>> = OnceCell::const_new();

pub struct SharedTestResources {
    pub base_config: Config,
}

pub async fn shared() -> anyhow::Result<Arc<SharedTestResources>> {
    SHARED
        .get_or_try_init(|| async {
            init_tracing();

            // Built-in defaults only, so a developer's config.toml or HOSPITAL__*
            // variables cannot change test outcomes.
            let mut config = Config::default();
            config.storage.backend = StorageBackend::Memory;
            config.database.run_migrations = false;

            Ok(Arc::new(SharedTestResources {
                base_config: config,
            }))
        })
        .await
        .cloned()
}

fn init_tracing() {
    use std::sync::OnceLock;
    use tracing_subscriber::prelude::*;
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "hospital_directory=warn".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}
