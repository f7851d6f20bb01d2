//! Language switches racing against resolution on other threads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use rstest::{fixture, rstest};
use tslocale_common::i18n::Translator;

const CONTEXT: &str = "QObject";
const GERMAN: &str = include_str!("fixtures/de_DE.ts");
const FRENCH: &str = include_str!("fixtures/fr_FR.ts");

const MESSAGES: [(&str, &str, &str); 3] = [
    ("Ready", "Bereit", "Prêt"),
    ("Set folder to %1", "Ordner auf /srv gesetzt", "Dossier défini sur /srv"),
    ("Close", "Schließen", "Fermer"),
];

#[fixture]
fn translator() -> Translator {
    let translator = Translator::default();
    let summary = translator.load_documents([("de_DE.ts", GERMAN), ("fr_FR.ts", FRENCH)]);
    assert!(summary.is_clean(), "sample catalogs should parse");
    translator
        .set_active_language("de_DE")
        .expect("de_DE is registered");
    translator
}

#[rstest]
fn resolution_never_observes_a_torn_switch(translator: Translator) {
    let stop = AtomicBool::new(false);

    thread::scope(|scope| {
        let readers: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let mut resolved = 0_usize;
                    while !stop.load(Ordering::Relaxed) || resolved == 0 {
                        for (source, german, french) in MESSAGES {
                            let text = translator.resolve(CONTEXT, source, &[&"/srv"]);
                            assert!(
                                text == german || text == french,
                                "unexpected rendering `{text}` for `{source}`",
                            );
                            resolved += 1;
                        }
                    }
                    resolved
                })
            })
            .collect();

        for round in 0..500 {
            let language = if round % 2 == 0 { "fr_FR" } else { "de_DE" };
            translator
                .set_active_language(language)
                .expect("language is registered");
        }
        stop.store(true, Ordering::Relaxed);

        for reader in readers {
            assert!(reader.join().expect("reader should not panic") > 0);
        }
    });
}

#[rstest]
fn snapshot_batches_stay_in_one_language(translator: Translator) {
    let stop = AtomicBool::new(false);

    thread::scope(|scope| {
        let reader = scope.spawn(|| {
            let mut batches = 0_usize;
            while !stop.load(Ordering::Relaxed) || batches == 0 {
                let snapshot = translator.snapshot();
                let rendered: Vec<String> = MESSAGES
                    .iter()
                    .map(|(source, _, _)| snapshot.resolve(CONTEXT, source, &[&"/srv"]))
                    .collect();
                let german = MESSAGES.iter().map(|(_, german, _)| *german);
                let french = MESSAGES.iter().map(|(_, _, french)| *french);
                assert!(
                    rendered.iter().map(String::as_str).eq(german)
                        || rendered.iter().map(String::as_str).eq(french),
                    "batch mixed languages: {rendered:?}",
                );
                batches += 1;
            }
            batches
        });

        for round in 0..500 {
            let language = if round % 2 == 0 { "fr_FR" } else { "de_DE" };
            translator
                .set_active_language(language)
                .expect("language is registered");
        }
        stop.store(true, Ordering::Relaxed);

        assert!(reader.join().expect("reader should not panic") > 0);
    });
}
