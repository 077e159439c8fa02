//! Blogy CLI: drive the translation orchestrator and assistant gateway
//! against a running backend.
//!
//! Usage:
//!   blogy translate <locale> <records.json>     Translate a JSON array of posts
//!   blogy chat <message...>                     One chat turn
//!   blogy explain <text...>                     Explain a passage
//!   blogy refine <tone> <text...>               Rewrite (professional|creative|concise)
//!   blogy ipa <text...>                         IPA transcription
//!   blogy generate <topic...>                   Title/SEO/hashtags/summary for a topic
//!   blogy locales                               List supported UI locales
//!
//! `--locale <code>` anywhere sets the reply language; without it the
//! configured default locale is used (BLOGY_LOCALE).

use blogy_lib::assistant::{AssistantError, Tone};
use blogy_lib::config::Settings;
use blogy_lib::locale::{Locale, LANGUAGES};
use blogy_lib::translation::FieldSelector;
use blogy_lib::widgets::DraftAssistant;
use blogy_lib::Client;

fn usage() -> ! {
    eprintln!("Usage:");
    eprintln!("  blogy translate <locale> <records.json>");
    eprintln!("  blogy chat <message...>");
    eprintln!("  blogy explain <text...>");
    eprintln!("  blogy refine <professional|creative|concise> <text...>");
    eprintln!("  blogy ipa <text...>");
    eprintln!("  blogy generate <topic...>");
    eprintln!("  blogy locales");
    eprintln!("Options:");
    eprintln!("  --locale <code>   reply language (default from settings)");
    std::process::exit(2);
}

fn fail(err: &AssistantError) -> ! {
    log::error!("[CLI] {}", err);
    eprintln!("{}", err.user_message());
    std::process::exit(1);
}

fn parse_locale(raw: &str) -> Locale {
    Locale::parse(raw).unwrap_or_else(|e| fail(&e))
}

/// Split out `--locale <code>`, returning it and the remaining arguments.
fn take_locale_flag(args: Vec<String>) -> (Option<Locale>, Vec<String>) {
    let mut locale = None;
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--locale" {
            let code = iter.next().unwrap_or_else(|| usage());
            locale = Some(parse_locale(&code));
        } else {
            rest.push(arg);
        }
    }
    (locale, rest)
}

fn rest(args: &[String], from: usize) -> String {
    let text = args.get(from..).unwrap_or_default().join(" ");
    if text.trim().is_empty() {
        usage();
    }
    text
}

#[tokio::main]
async fn main() {
    blogy_lib::bootstrap();

    let (locale_flag, args) = take_locale_flag(std::env::args().collect());
    let command = args.get(1).map(String::as_str).unwrap_or_else(|| usage());

    if command == "locales" {
        for lang in LANGUAGES {
            println!("{}\t{}\t{}\t{}", lang.code, lang.name, lang.native_name, lang.voice_tag);
        }
        return;
    }

    let client = Client::new(Settings::load()).unwrap_or_else(|e| fail(&e));
    let locale = locale_flag.unwrap_or_else(|| client.ui_locale());
    let gateway = &client.gateway;

    let output = match command {
        "translate" => {
            let target = parse_locale(args.get(2).unwrap_or_else(|| usage()));
            let path = args.get(3).unwrap_or_else(|| usage());
            let raw = std::fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Failed to read {}: {}", path, e);
                std::process::exit(1);
            });
            let records: Vec<serde_json::Value> = serde_json::from_str(&raw)
                .unwrap_or_else(|e| fail(&AssistantError::Validation(e.to_string())));
            let translated = client
                .orchestrator
                .translate_records(&records, &FieldSelector::default(), &target)
                .await;
            serde_json::to_string_pretty(&translated)
                .unwrap_or_else(|e| fail(&AssistantError::MalformedResponse(e.to_string())))
        }
        "chat" => {
            let mut chat = client.chat_session();
            let reply = chat
                .send(&rest(&args, 2), &locale)
                .await
                .map(|turn| turn.content.clone());
            reply.unwrap_or_else(|| usage())
        }
        "explain" => gateway
            .explain(&rest(&args, 2), &locale)
            .await
            .unwrap_or_else(|e| fail(&e)),
        "refine" => {
            let tone: Tone = args
                .get(2)
                .unwrap_or_else(|| usage())
                .parse()
                .unwrap_or_else(|_| usage());
            gateway
                .refine(&rest(&args, 3), tone, &locale)
                .await
                .unwrap_or_else(|e| fail(&e))
        }
        "ipa" => gateway
            .phonetic(&rest(&args, 2))
            .await
            .unwrap_or_else(|e| fail(&e)),
        "generate" => {
            let topic = rest(&args, 2);
            let mut draft = DraftAssistant::new(gateway.clone(), locale.clone());
            let generated = draft.generate(&topic).await.unwrap_or_else(|e| fail(&e));
            let Some(generated) = generated else {
                eprintln!("Topic too short. Please write at least 5 characters.");
                std::process::exit(1);
            };
            serde_json::to_string_pretty(generated)
                .unwrap_or_else(|e| fail(&AssistantError::MalformedResponse(e.to_string())))
        }
        _ => usage(),
    };

    println!("{}", output);
}
