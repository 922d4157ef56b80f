use bioregistry::{
    Config, ConverterOptions, IriOptions, Manager, Metaregistry, Reference, Registry,
    RegistryError, Resource, build_records,
};

const REGISTRY: &str = include_str!("data/registry.json");
const METAREGISTRY: &str = include_str!("data/metaregistry.json");

fn manager() -> Manager {
    Manager::new(Registry::from_json(REGISTRY).unwrap())
}

#[test]
fn synonym_resolves_to_canonical_prefix() {
    let manager = manager();
    assert_eq!(manager.normalize_prefix("taxonomy"), Some("ncbitaxon"));
    assert_eq!(manager.normalize_prefix("NCBITaxon"), Some("ncbitaxon"));
    assert_eq!(manager.normalize_prefix("PMID"), Some("pubmed"));
    assert_eq!(manager.normalize_prefix("ChEBI"), Some("chebi"));
    assert_eq!(manager.normalize_prefix("not-a-prefix"), None);
}

#[test]
fn obo_banana_is_stripped() {
    let manager = manager();
    assert_eq!(
        manager.parse_curie("go:GO:0032571"),
        Some(Reference::new("go", "0032571"))
    );
}

#[test]
fn curie_without_banana_is_unchanged() {
    let manager = manager();
    assert_eq!(
        manager.parse_curie("go:0032571"),
        Some(Reference::new("go", "0032571"))
    );
}

#[test]
fn valid_identifier_is_checked_as_written() {
    let manager = manager();
    assert!(manager.is_valid_identifier("chebi", "24867"));
    assert!(!manager.is_valid_identifier("chebi", "CHEBI:24867"));
}

#[test]
fn standardizable_identifier_is_normalized_first() {
    let manager = manager();
    assert!(manager.is_standardizable_identifier("chebi", "CHEBI:24867"));
    assert!(manager.is_standardizable_identifier("ChEBIID", "24867"));
    assert!(!manager.is_standardizable_identifier("chebi", "CHEBI:abc"));
    assert!(!manager.is_standardizable_identifier("nope", "24867"));
}

#[test]
fn stylized_obo_banana_is_stripped() {
    let manager = manager();
    assert_eq!(
        manager.normalize_parsed_curie("fbbt", "FBbt:0007294"),
        Some(Reference::new("fbbt", "0007294"))
    );
    assert!(manager.is_standardizable_identifier("fbbt", "FBbt:0007294"));
}

#[test]
fn iri_follows_priority() {
    let manager = manager();
    assert_eq!(
        manager
            .get_iri("chebi", Some("24867"), &IriOptions::default())
            .as_deref(),
        Some("https://www.ebi.ac.uk/chebi/searchId.do?chebiId=CHEBI:24867")
    );
    let options = IriOptions {
        priority: Some(vec!["obofoundry".to_string(), "default".to_string()]),
        ..Default::default()
    };
    assert_eq!(
        manager.get_iri("chebi:24867", None, &options).as_deref(),
        Some("http://purl.obolibrary.org/obo/CHEBI_24867")
    );
}

#[test]
fn every_provider_uri_parses() {
    let manager = manager();
    for resource in manager.registry().iter() {
        let Some(example) = resource.get_example() else {
            continue;
        };
        for (code, uri) in manager.get_providers_list(&resource.prefix, example) {
            assert!(
                url::Url::parse(&uri).is_ok(),
                "{} provider for {} produced {}",
                code,
                resource.prefix,
                uri
            );
        }
    }
}

#[test]
fn self_resolver_is_first_or_second() {
    let manager = manager();
    for resource in manager.registry().iter() {
        let providers = manager.get_providers_list(&resource.prefix, "1");
        if providers.is_empty() {
            continue;
        }
        let position = providers
            .iter()
            .position(|(code, _)| code == "bioregistry")
            .unwrap();
        assert!(position <= 1, "{}: {:?}", resource.prefix, providers);
        if position == 1 {
            assert_eq!(providers[0].0, "default");
        }
    }
}

#[test]
fn records_do_not_overlap() {
    let manager = manager();
    let records = manager.records().unwrap();
    let mut prefixes = std::collections::BTreeSet::new();
    let mut uri_prefixes = std::collections::BTreeSet::new();
    for record in records {
        assert!(prefixes.insert(record.prefix.clone()));
        for synonym in &record.prefix_synonyms {
            assert!(prefixes.insert(synonym.clone()), "{}", synonym);
        }
        assert!(uri_prefixes.insert(record.uri_prefix.clone()));
        for synonym in &record.uri_prefix_synonyms {
            assert!(uri_prefixes.insert(synonym.clone()), "{}", synonym);
        }
    }
}

#[test]
fn converter_round_trips_examples() {
    let manager = manager();
    let converter = manager.get_converter().unwrap();
    for record in converter.records() {
        let resource = manager.get_resource(&record.prefix).unwrap();
        let Some(example) = resource.get_example() else {
            continue;
        };
        let curie = format!("{}:{}", record.prefix, example);
        let iri = converter.expand(&curie).unwrap();
        assert_eq!(converter.compress(&iri), Some(curie));
    }
}

#[test]
fn provides_resource_folds_into_target() {
    let manager = manager();
    let converter = manager.get_converter().unwrap();
    assert_eq!(converter.standardize_prefix("chebi-img"), Some("chebi"));
    assert_eq!(converter.standardize_prefix("chembl.target"), Some("chembl"));
    assert_eq!(
        converter.standardize_prefix("chembl.compound"),
        Some("chembl.compound")
    );
}

#[test]
fn strict_converter_reports_collisions() {
    let mut a = Resource::new("a");
    a.uri_format = Some("https://example.org/$1".to_string());
    let mut b = Resource::new("b");
    b.uri_format = Some("https://example.org/$1".to_string());
    let registry = Registry::from_resources([a, b]);

    let lenient = build_records(&registry, &ConverterOptions::default()).unwrap();
    assert_eq!(lenient.len(), 1);
    assert_eq!(lenient[0].prefix, "a");

    let strict = ConverterOptions {
        strict: true,
        ..Default::default()
    };
    let err = build_records(&registry, &strict).unwrap_err();
    assert!(matches!(err, RegistryError::UriPrefixCollision { .. }));
}

#[test]
fn metaregistry_file_extends_builtins() {
    let registry = Registry::from_json(REGISTRY).unwrap();
    let metaregistry = Metaregistry::from_json(METAREGISTRY).unwrap();
    let manager = Manager::with_parts(registry, metaregistry, Config::default()).unwrap();
    assert_eq!(
        manager
            .get_registry_uri("miriam", "chebi")
            .unwrap()
            .as_deref(),
        Some("https://registry.identifiers.org/registry/chebi")
    );
    assert!(matches!(
        manager.get_registry_uri("nonexistent", "chebi"),
        Err(RegistryError::UnknownMetaprefix(_))
    ));
}
