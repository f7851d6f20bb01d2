use std::fmt::Display;

use rstest::{fixture, rstest};

use super::testing::TsDocument;
use super::{Catalog, CatalogEntry, LanguageId, Origin, Translator};

const CONTEXT: &str = "QObject";

#[fixture]
fn translator() -> Translator {
    let translator = Translator::default();
    let documents = [
        TsDocument::new("de_DE")
            .context(CONTEXT)
            .messages([
                ("Set folder to %1", "Ordner auf %1 gesetzt"),
                (
                    "[VISION] Decoding image batch %1/%2 (%3%)",
                    "[VISION] Bildbatch %1/%2 wird decodiert (%3%)",
                ),
                ("Ready", "Bereit"),
            ])
            .render(),
        TsDocument::new("it_IT")
            .context(CONTEXT)
            .messages([
                (
                    "[VISION] Decoding image batch %1/%2 (%3%)",
                    "[VISIONE] Decodifica del lotto di immagini %1/%2 (%3%)",
                ),
                ("Ready", "Pronto"),
            ])
            .render(),
    ];
    for document in &documents {
        translator
            .load_document(document)
            .expect("sample catalog should parse");
    }
    translator
}

#[rstest]
#[case("en_US", "[VISION] Decoding image batch 4/10 (40%)")]
#[case("de_DE", "[VISION] Bildbatch 4/10 wird decodiert (40%)")]
#[case("it_IT", "[VISIONE] Decodifica del lotto di immagini 4/10 (40%)")]
fn renders_literal_percent_after_placeholder(
    translator: Translator,
    #[case] language: &str,
    #[case] expected: &str,
) {
    translator
        .set_active_language(language)
        .expect("language should be registered");
    let args: [&dyn Display; 3] = [&"4", &"10", &"40"];

    let rendered = translator.resolve(CONTEXT, "[VISION] Decoding image batch %1/%2 (%3%)", &args);

    assert_eq!(rendered, expected);
}

#[rstest]
fn global_context_example_matches_in_both_languages() {
    let translator = Translator::default();
    let mut builder = Catalog::builder("de_DE".parse().expect("valid tag"));
    builder.insert(CatalogEntry::new("", "Set folder to %1", "Ordner auf %1 gesetzt"));
    translator.register(builder.build().0);

    assert_eq!(
        translator.resolve("", "Set folder to %1", &[&"C:\\data"]),
        "Set folder to C:\\data"
    );

    translator
        .set_active_language("de_DE")
        .expect("de_DE is registered");

    assert_eq!(
        translator.resolve("", "Set folder to %1", &[&"C:\\data"]),
        "Ordner auf C:\\data gesetzt"
    );
}

#[rstest]
fn repeated_resolution_is_stable(translator: Translator) {
    translator
        .set_active_language("de_DE")
        .expect("de_DE is registered");

    let first = translator.lookup(CONTEXT, "Set folder to %1", &[&"/tmp"]);
    let outputs: Vec<String> = (0..16)
        .map(|_| translator.resolve(CONTEXT, "Set folder to %1", &[&"/tmp"]))
        .collect();

    assert_eq!(first.origin(), Origin::Translated);
    assert!(outputs.iter().all(|output| output == first.text()));
}

#[rstest]
fn missing_keys_render_like_translations(translator: Translator) {
    translator
        .set_active_language("it_IT")
        .expect("it_IT is registered");

    let rendered = translator.resolve(CONTEXT, "Set folder to %1", &[&"C:\\data"]);

    assert_eq!(rendered, "Set folder to C:\\data");
}

#[rstest]
fn languages_are_independently_partial(translator: Translator) {
    let german = translator
        .catalog(&"de_DE".parse::<LanguageId>().expect("valid tag"))
        .expect("de_DE is registered");
    let italian = translator
        .catalog(&"it_IT".parse::<LanguageId>().expect("valid tag"))
        .expect("it_IT is registered");

    assert!(german.get(CONTEXT, "Set folder to %1").is_some());
    assert!(italian.get(CONTEXT, "Set folder to %1").is_none());
}
