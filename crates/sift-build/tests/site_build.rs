//! End-to-end build of a small multilingual site.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Value, json};
use sift_build::{
    BuildSession, DocumentPayload, LanguageList, LocaleSpec, ModuleOptions, OptionResolver,
    SiftConfig,
};
use sift_index::StemmerRegistry;

const DOCS: &[(&str, &str)] = &[
    ("Alan Turing", "Alan Turing was a mathematician and computer scientist"),
    ("Ada Lovelace", "Ada Lovelace wrote the first algorithm for a machine"),
    ("Grace Hopper", "Grace Hopper invented the first compiler"),
    ("Alan Kay", "Alan Kay pioneered object oriented programming"),
    ("Edsger Dijkstra", "Dijkstra wrote about structured programming"),
];

fn site_options(registry: &StemmerRegistry) -> sift_build::ResolvedOptions {
    OptionResolver::new(registry)
        .call_site(ModuleOptions {
            path: Some("my-crazy-search-index-path".into()),
            default_language: Some("french".into()),
            languages: Some(LanguageList::Many(vec![LocaleSpec::from("en")])),
            language_stemmer_map: Some(BTreeMap::from([(
                "af".to_string(),
                "nl".to_string(),
            )])),
            fields: Some(vec!["name".into(), "body".into()]),
            ..Default::default()
        })
        .external_locales(vec!["en".into(), "fr".into(), "af".into()])
        .resolve()
}

fn parse(assets: &sift_build::AssetSet, name: &str) -> Value {
    serde_json::from_str(assets.get(name).unwrap().source()).unwrap()
}

#[tokio::test]
async fn test_multilingual_site() {
    let registry = Arc::new(StemmerRegistry::builtin());
    let options = site_options(&registry);
    assert_eq!(options.default_language, "en");
    let mut session = BuildSession::new(options, Arc::clone(&registry));

    // Submissions without a document, and a document without a ref.
    assert!(!session.submit(DocumentPayload::default()).is_accepted());
    assert!(
        !session
            .submit(DocumentPayload {
                document: Some(json!(true)),
                ..Default::default()
            })
            .is_accepted()
    );

    for (i, (name, body)) in DOCS.iter().enumerate() {
        let id = i + 1;
        let locale = if id == 1 {
            "fr"
        } else if id % 2 == 1 {
            "en"
        } else {
            "af"
        };
        let doc = json!({ "id": id, "name": name, "body": body });
        let outcome = session.submit(DocumentPayload::new(locale, doc.clone()).with_meta(doc));
        assert!(outcome.is_accepted());
        // fr is not enabled, so it falls back to the default stemmer.
        assert_eq!(outcome.stemmer_fallback(), locale == "fr");
    }

    let assets = session.finalize().await.unwrap();
    assert_eq!(
        assets.names().collect::<Vec<_>>(),
        vec![
            "my-crazy-search-index-path/af.json",
            "my-crazy-search-index-path/en.json",
            "my-crazy-search-index-path/fr.json",
        ]
    );

    let en = parse(&assets, "my-crazy-search-index-path/en.json");
    assert_eq!(en["documents"], json!(["3", "5"]));
    assert_eq!(en["pipeline"][2], "stemmer");
    assert_eq!(en["metas"]["3"]["name"], "Grace Hopper");

    let af = parse(&assets, "my-crazy-search-index-path/af.json");
    assert_eq!(af["documents"], json!(["2", "4"]));
    assert_eq!(af["pipeline"][2], "stemmer-nl");

    let fr = parse(&assets, "my-crazy-search-index-path/fr.json");
    assert_eq!(fr["documents"], json!(["1"]));
    assert!(registry.is_loaded("nl").await);
}

#[tokio::test]
async fn test_single_document_without_metadata() {
    let registry = Arc::new(StemmerRegistry::builtin());
    let options = OptionResolver::new(&registry)
        .call_site(ModuleOptions {
            fields: Some(vec!["name".into(), "body".into()]),
            ..Default::default()
        })
        .resolve();
    let mut session = BuildSession::new(options, registry);

    session.submit(DocumentPayload::new(
        "en",
        json!({ "id": 1, "name": "Alan", "body": "..." }),
    ));
    let assets = session.finalize().await.unwrap();

    assert_eq!(assets.len(), 1);
    let en = parse(&assets, "search-index/en.json");
    assert!(en.get("metas").is_none());
    assert_eq!(en["documents"], json!(["1"]));
    let alan = en["invertedIndex"]
        .as_array()
        .unwrap()
        .iter()
        .find(|entry| entry[0] == "alan")
        .unwrap();
    assert_eq!(alan[1]["name"]["1"]["tf"], 1);
}

#[tokio::test]
async fn test_unsupported_locale_keeps_its_bucket() {
    let registry = Arc::new(StemmerRegistry::builtin());
    let options = OptionResolver::new(&registry)
        .call_site(ModuleOptions {
            default_language: Some("fr".into()),
            languages: Some(LanguageList::One("fr".into())),
            ..Default::default()
        })
        .resolve();
    let mut session = BuildSession::new(options, registry);

    let outcome = session.submit(DocumentPayload::new(
        "xx",
        json!({ "id": 1, "title": "Les chansons", "body": "" }),
    ));
    assert!(outcome.stemmer_fallback());

    let assets = session.finalize().await.unwrap();
    let xx = parse(&assets, "search-index/xx.json");
    assert_eq!(xx["pipeline"][2], "stemmer-fr");
    assert!(assets.get("search-index/fr.json").is_none());
}

#[tokio::test]
async fn test_build_from_config_file_and_write() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let out_dir = dir.path().join("dist");
    std::fs::write(
        &config_path,
        format!(
            r#"
                output_dir = "{}"
                locales = ["en", {{ code = "de_DE" }}]

                [search]
                path = "/search/"
            "#,
            out_dir.display()
        ),
    )
    .unwrap();

    let config = SiftConfig::load(Some(config_path.to_str().unwrap())).unwrap();
    let registry = Arc::new(StemmerRegistry::builtin());
    let options = config.resolve(&registry, ModuleOptions::default());
    assert!(options.is_supported("de"));

    let mut session = BuildSession::new(options, registry);
    session.submit(DocumentPayload::new(
        "de_DE",
        json!({ "id": "a", "title": "Bücher", "body": "Die Bücher" }),
    ));
    session.submit(DocumentPayload::new(
        "en",
        json!({ "id": "b", "title": "Books", "body": "The books" }),
    ));

    let assets = session.finalize().await.unwrap();
    let written = assets.write_to(config.output_dir().unwrap()).await.unwrap();

    assert_eq!(written.len(), 2);
    assert!(out_dir.join("search/de.json").exists());
    assert!(out_dir.join("search/en.json").exists());
}
