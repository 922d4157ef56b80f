#[cfg(test)]
pub mod test_helpers {
    use crate::{Config, Manager, Metaregistry, Registry};

    /// The shared fixture registry, as JSON.
    pub const FIXTURE_REGISTRY: &str = include_str!("../tests/data/registry.json");

    /// Metaregistry entries merged over the built-ins in some tests.
    pub const FIXTURE_METAREGISTRY: &str = include_str!("../tests/data/metaregistry.json");

    /// Parses the fixture registry
    pub fn fixture_registry() -> Registry {
        Registry::from_json(FIXTURE_REGISTRY).expect("fixture registry should parse")
    }

    /// Creates a manager over the fixture registry with the built-in metaregistry
    pub fn fixture_manager() -> Manager {
        Manager::new(fixture_registry())
    }

    /// Creates a manager over the fixture registry and fixture metaregistry
    pub fn fixture_manager_with(config: Config) -> Manager {
        let metaregistry =
            Metaregistry::from_json(FIXTURE_METAREGISTRY).expect("fixture metaregistry should parse");
        Manager::with_parts(fixture_registry(), metaregistry, config)
            .expect("fixture should build in strict mode")
    }
}
