use std::sync::Arc;

use kyrolookup::{
    Entity, Extracted, FuzzLookup, Lookup, LookupBuilder, LookupConfig, LookupError, NotFoundMode,
    Resolved, Scorer, TiebreakerMode,
};

/// Fixed-table scorer so thresholds can be tested exactly.
struct Fixed(Vec<(&'static str, f64)>);

impl Scorer for Fixed {
    fn extract(&self, query: &str, choices: &[String], limit: usize) -> Vec<Extracted> {
        kyrolookup::scorer::rank(query, choices, limit, |_, choice| {
            self.0
                .iter()
                .find(|(c, _)| *c == choice)
                .map_or(0.0, |(_, s)| *s)
        })
    }
}

fn cities() -> Vec<Entity> {
    vec![
        Entity::new("New York").with_aliases(["NYC", "Big Apple"]),
        Entity::new("Newark"),
    ]
}

#[cfg(feature = "strsim")]
#[test]
fn new_york_scenario_with_builtin_scorer() {
    let resolver = LookupBuilder::new()
        .fuzz_min_score(80.0)
        .fuzz(cities())
        .unwrap();

    let nyc = resolver.matches("NYC").unwrap();
    let m = nyc.first().unwrap();
    assert_eq!(m.value(), "New York");
    assert!(m.is_alias);

    let exact = resolver.matches("new york").unwrap();
    let m = exact.first().unwrap();
    assert_eq!(m.value(), "New York");
    assert!(!m.is_alias);

    let typo = resolver.matches("New Yrok").unwrap();
    let m = typo.first().unwrap();
    assert_eq!(m.value(), "New York");
    assert!(m.score.unwrap() >= 80.0);

    let err = resolver.resolve("Boston").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn exact_name_beats_alias_and_fuzzy() {
    // "Newark" is another entity's alias and the scorer favours that entity;
    // the canonical name must still win.
    let mut source = cities();
    source.push(Entity::new("Newark Liberty").with_aliases(["Newark"]));
    let scorer = Arc::new(Fixed(vec![("newark liberty", 100.0)]));
    let resolver = LookupBuilder::new().scorer(scorer).fuzz(source).unwrap();

    let matches = resolver.matches("Newark").unwrap();
    let m = matches.first().unwrap();
    assert_eq!(m.value(), "Newark");
    assert!(!m.is_alias);
    assert!(m.score.is_none());
}

#[test]
fn alias_beats_fuzzy() {
    let scorer = Arc::new(Fixed(vec![("newark", 100.0)]));
    let resolver = LookupBuilder::new().scorer(scorer).fuzz(cities()).unwrap();
    let matches = resolver.matches("Big Apple").unwrap();
    let m = matches.first().unwrap();
    assert_eq!(m.value(), "New York");
    assert!(m.is_alias);
}

#[test]
fn case_permutations_resolve_when_insensitive() {
    let resolver = LookupBuilder::new().alias(cities()).unwrap();
    for key in ["new york", "NEW YORK", "nEw YoRk", "nyc", "Nyc", "BIG apple"] {
        assert_eq!(
            resolver.resolve_value(key).unwrap().as_deref(),
            Some("New York"),
            "key {key}"
        );
    }
}

#[test]
fn case_sensitive_falls_through_to_not_found() {
    let resolver = LookupBuilder::new()
        .case_sensitive(true)
        .notfound_mode(NotFoundMode::None)
        .alias(cities())
        .unwrap();
    assert_eq!(resolver.resolve_value("New York").unwrap().as_deref(), Some("New York"));
    assert_eq!(resolver.resolve_value("new york").unwrap(), None);
    assert_eq!(resolver.resolve_value("nyc").unwrap(), None);
}

#[test]
fn case_sensitive_falls_through_to_fuzzy() {
    let scorer = Arc::new(Fixed(vec![("new york", 100.0)]));
    let resolver = LookupBuilder::new()
        .case_sensitive(true)
        .scorer(scorer)
        .fuzz(cities())
        .unwrap();
    let matches = resolver.matches("new york").unwrap();
    let m = matches.first().unwrap();
    assert_eq!(m.value(), "New York");
    assert_eq!(m.score, Some(100.0));
}

#[test]
fn tie_break_is_deterministic() {
    let twins = || {
        vec![
            Entity::new("Springfield, MA").with_aliases(["Springfield"]),
            Entity::new("Springfield, IL").with_aliases(["Springfield"]),
        ]
    };

    for _ in 0..10 {
        let err = LookupBuilder::new().alias(twins()).unwrap_err();
        assert!(matches!(err, LookupError::Conflict { ref key, .. } if key == "springfield"));

        let resolver = LookupBuilder::new()
            .tiebreaker_mode(TiebreakerMode::Alphabetical)
            .alias(twins())
            .unwrap();
        assert_eq!(
            resolver.resolve_value("springfield").unwrap().as_deref(),
            Some("Springfield, IL")
        );
    }
}

#[test]
fn priority_overrides_both_modes() {
    let source = || {
        vec![
            Entity::new("Springfield, IL").with_aliases(["Springfield"]),
            Entity::new("Springfield, MA").with_aliases(["Springfield"]).with_priority(1),
        ]
    };
    for mode in [TiebreakerMode::Raise, TiebreakerMode::Alphabetical] {
        let resolver = LookupBuilder::new().tiebreaker_mode(mode).alias(source()).unwrap();
        assert_eq!(
            resolver.resolve_value("Springfield").unwrap().as_deref(),
            Some("Springfield, MA")
        );
    }
}

#[test]
fn score_threshold_is_inclusive() {
    let at = LookupBuilder::new()
        .scorer(Arc::new(Fixed(vec![("newark", 80.0)])))
        .notfound_mode(NotFoundMode::None)
        .fuzz(cities())
        .unwrap();
    assert_eq!(at.resolve_value("Nwark").unwrap().as_deref(), Some("Newark"));

    let below = LookupBuilder::new()
        .scorer(Arc::new(Fixed(vec![("newark", 79.0)])))
        .notfound_mode(NotFoundMode::None)
        .fuzz(cities())
        .unwrap();
    assert_eq!(below.resolve_value("Nwark").unwrap(), None);
}

#[test]
fn not_found_modes() {
    let scorer = Arc::new(Fixed(Vec::new()));
    let build = |mode| {
        LookupBuilder::new()
            .notfound_mode(mode)
            .scorer(scorer.clone())
            .fuzz(cities())
            .unwrap()
    };

    let err = build(NotFoundMode::Raise).resolve("Boston").unwrap_err();
    assert!(matches!(err, LookupError::NotFound { ref key } if key == "Boston"));

    assert_eq!(build(NotFoundMode::None).resolve("Boston").unwrap(), None);

    assert_eq!(
        build(NotFoundMode::Allow).resolve("Boston").unwrap(),
        Some(Resolved::Key("Boston".to_string()))
    );
}

#[test]
fn raw_strings_and_entities_mix() {
    let source: Vec<kyrolookup::EntitySource> = vec![
        "Boston".into(),
        Entity::new("New York").with_aliases(["NYC"]).into(),
    ];
    let lookup = FuzzLookup::new(
        source,
        &LookupConfig::default(),
        Some(Arc::new(Fixed(Vec::new()))),
    )
    .unwrap();
    assert_eq!(lookup.entity_count(), 2);
    assert_eq!(lookup.corpus(), ["boston", "new york", "nyc"]);
}

#[test]
fn fuzzy_match_through_resolver_reports_entity() {
    let scorer = Arc::new(Fixed(vec![("big apple", 92.0)]));
    let resolver = LookupBuilder::new().scorer(scorer).fuzz(cities()).unwrap();
    let resolved = resolver.resolve("big aple").unwrap().unwrap();
    let entity = resolved.entity().unwrap();
    assert_eq!(entity.value, "New York");
    assert_eq!(entity.aliases.len(), 2);
}

#[test]
fn config_from_json_drives_builder() {
    let raw = r#"{"notfound_mode": "allow", "fuzz": {"limit": 2, "min_score": 95}}"#;
    let config: LookupConfig = serde_json::from_str(raw).unwrap();
    let resolver = LookupBuilder::new()
        .config(config)
        .scorer(Arc::new(Fixed(vec![("newark", 90.0)])))
        .fuzz(cities())
        .unwrap();
    assert_eq!(resolver.resolve_value("Nwark").unwrap().as_deref(), Some("Nwark"));
}
