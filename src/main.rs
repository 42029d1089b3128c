//! # Folio CLI
//!
//! Usage:
//!   folio input.json -o output.pdf
//!   echo '[ ... ]' | folio -o output.pdf
//!   folio input.json --layout-info
//!   folio --example > document.json
//!
//! Set `RUST_LOG=debug` to see page-break decisions.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--example") {
        print!("{}", example_document_json());
        return;
    }

    let input = if args.len() > 1 && !args[1].starts_with('-') {
        match fs::read_to_string(&args[1]) {
            Ok(text) => text,
            Err(e) => fail(&format!("Failed to read {}: {}", args[1], e)),
        }
    } else {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            fail(&format!("Failed to read stdin: {}", e));
        }
        buf
    };

    let document = match folio::parse_document(&input) {
        Ok(document) => document,
        Err(e) => fail(&e.to_string()),
    };

    if args.iter().any(|a| a == "--layout-info") {
        let info = folio::layout_info(&document);
        match serde_json::to_string_pretty(&info) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&format!("Failed to serialize layout info: {}", e)),
        }
        return;
    }

    let output_path = args
        .windows(2)
        .find(|w| w[0] == "-o")
        .map(|w| w[1].clone())
        .unwrap_or_else(|| "output.pdf".to_string());

    match folio::render(&document) {
        Ok(pdf_bytes) => {
            if let Err(e) = fs::write(&output_path, &pdf_bytes) {
                fail(&format!("Failed to write {}: {}", output_path, e));
            }
            eprintln!("✓ Written {} bytes to {}", pdf_bytes.len(), output_path);
        }
        Err(e) => fail(&e.to_string()),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("✗ {}", message);
    process::exit(1);
}

fn example_document_json() -> &'static str {
    r##"{
  "metadata": {
    "title": "Description du service",
    "subtitle": "Hébergement et maintenance applicative",
    "version": "Version 2.3 — mars 2026",
    "documentName": "description-service.pdf"
  },
  "page": {
    "bodyBottom": 70,
    "keepWithNext": 60
  },
  "lines": [
    { "text": "Objet du service", "font": "Heading", "size": 12 },
    { "text": "Ce document décrit le périmètre, les engagements et les modalités d’exploitation du service d’hébergement.", "font": "Body", "size": 11 },
    { "text": "", "font": "Body", "size": 11 },
    { "text": "Périmètre", "font": "Heading", "size": 12 },
    { "text": "- Hébergement des environnements de recette et de production, supervision continue et sauvegardes quotidiennes conservées trente jours.", "font": "Body", "size": 11 },
    { "text": "- Maintenance corrective (anomalies bloquantes traitées sous quatre heures ouvrées).", "font": "Body", "size": 11 },
    { "text": "- Maintenance évolutive sur devis.", "font": "Body", "size": 11 },
    { "text": "", "font": "Body", "size": 11 },
    { "text": "Engagements de niveau de service", "font": "Heading", "size": 12 },
    { "text": "Disponibilité mensuelle cible : 99,9 % hors fenêtres de maintenance planifiées, annoncées au moins cinq jours ouvrés à l’avance.", "font": "Body", "size": 11 }
  ]
}
"##
}
