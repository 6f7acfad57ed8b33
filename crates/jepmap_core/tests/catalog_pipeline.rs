use jepmap_core::ingest::links::{item_number_from_link, scan_declared_groups};
use jepmap_core::{
    CatalogService, CorpusIndex, EngineConfig, EntityStore, Group, GroupKind, Item,
    LinkDirection, OverrideRules, RawLink, SearchQuery,
};

const HOST: &str = "openjdk.java.net";

fn ingested_store(config: &EngineConfig) -> EntityStore {
    let mut store = EntityStore::new();
    for (link, name) in [
        ("https://openjdk.java.net/projects/amber/", "Amber"),
        ("/projects/loom", "Loom"),
        ("https://openjdk.java.net/projects/valhalla#news", "Valhalla"),
        ("/projects/jdk/17/", "JDK 17"),
        ("https://example.com/projects/elsewhere", "Elsewhere"),
    ] {
        if let Some(group) = Group::organizational_from_link(link, name, HOST) {
            store.put_group(group);
        }
    }

    let jeps_page = ["/jeps/286", "/jeps/0", "/jeps/358", "/jeps/8130200"];
    let numbers: Vec<_> = jeps_page.iter().filter_map(|link| item_number_from_link(link)).collect();
    assert_eq!(numbers, vec![286, 358, 8_130_200]);

    let mut var = Item::new(286, "JEP 286: Local-Variable Type Inference");
    var.external_ref = Some("8151454".to_string());
    var.discussion = Some("platform dash jep dash discuss at openjdk dot java dot net".to_string());
    var.release = Some("10".to_string());
    var.body = Some(
        "Part of https://openjdk.java.net/projects/amber/ and related to \
         https://openjdk.java.net/projects/valhalla. Extends type inference to local variables."
            .to_string(),
    );
    var.declared_groups = scan_declared_groups(var.body.as_deref().unwrap_or(""), HOST);
    var.record_link(
        &RawLink::new("8200000", LinkDirection::Outward, "Relates", "JEP"),
        &config.item_issue_type,
    );
    var.record_link(
        &RawLink::new("9999999", LinkDirection::Inward, "Blocks", "JEP"),
        &config.item_issue_type,
    );
    var.record_link(
        &RawLink::new("8111111", LinkDirection::Outward, "Relates", "Sub-task"),
        &config.item_issue_type,
    );
    store.put_item(var);

    let mut npe = Item::new(358, "JEP 358: Helpful NullPointerExceptions");
    npe.external_ref = Some("8200000".to_string());
    npe.release = Some("14".to_string());
    npe.record_link(
        &RawLink::new("8151454", LinkDirection::Inward, "Blocks", "JEP"),
        &config.item_issue_type,
    );
    store.put_item(npe);

    let mut test = Item::new(8_130_200, "JEP 8130200: Test JEP");
    test.external_ref = Some("8130200".to_string());
    test.discussion = Some("loom dash dev at openjdk dot java dot net".to_string());
    test.release = Some("tbd".to_string());
    store.put_item(test);

    store
}

#[test]
fn finalize_resolves_links_and_reconciles_projects() {
    let config = EngineConfig::default();
    let rules = OverrideRules::parse("# keep the test JEP out of everything\n8130200=*\n286:valhalla\n")
        .unwrap();
    let service = CatalogService::new(rules, config.clone());
    let mut store = ingested_store(&config);

    // Release-line pages in the sidebar never become organizational projects.
    assert!(!store.contains_group("jdk/17"));
    let added = service.register_release_lines(&mut store);
    assert_eq!(added, 13);
    assert!(matches!(
        store.get_group("jdk/17").unwrap().kind(),
        GroupKind::ReleaseLine { major: 17 }
    ));
    assert!(matches!(
        store.get_group("jdk9").unwrap().kind(),
        GroupKind::ReleaseLine { major: 9 }
    ));

    let report = service.finalize(&mut store);

    let var = store.get_item(286).unwrap();
    assert!(var.related().contains(&358));
    assert!(var.depends().is_empty());
    assert!(!var.declared_groups.contains("valhalla"));
    let npe = store.get_item(358).unwrap();
    assert!(npe.depends().contains(&286));
    assert!(npe.related().contains(&286));
    assert_eq!(report.links.translated, 2);
    assert_eq!(report.links.dangling, 1);

    let ids = |number| -> Vec<String> {
        store
            .groups_for_item(number)
            .into_iter()
            .map(|group| group.id().to_string())
            .collect()
    };
    assert_eq!(ids(286), vec!["amber", "jdk/10"]);
    assert_eq!(ids(358), vec!["jdk/14"]);
    assert!(ids(8_130_200).is_empty());
    assert_eq!(report.groups.declared_removed, 1);
    assert!(store.get_group("elsewhere").is_err());

    let corpus = CorpusIndex::from_store(&store, config.search.clone());
    let hits = corpus.search(&SearchQuery::new("type inference"));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].number, 286);
    assert_eq!(hits[0].snippets.len(), 1);
}

#[test]
fn finalize_twice_changes_nothing() {
    let config = EngineConfig::default();
    let service = CatalogService::new(OverrideRules::default(), config.clone());
    let mut store = ingested_store(&config);
    service.register_release_lines(&mut store);

    service.finalize(&mut store);
    let snapshot: Vec<_> = store
        .groups()
        .map(|group| (group.id().to_string(), group.members().clone()))
        .collect();
    let second = service.finalize(&mut store);

    let after: Vec<_> = store
        .groups()
        .map(|group| (group.id().to_string(), group.members().clone()))
        .collect();
    assert_eq!(snapshot, after);
    assert_eq!(second.groups.added, 0);
    assert_eq!(second.links.translated, 0);
    assert_eq!(service.register_release_lines(&mut store), 0);
}
