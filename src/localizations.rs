use std::collections::HashMap;

use log::debug;
use unic_langid::LanguageIdentifier;

const FALLBACK_LANG: &str = "en-US";

// Simple in-memory translations
#[derive(Default)]
pub struct Translations {
    strings: HashMap<&'static str, &'static str>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, value: &'static str) {
        self.strings.insert(key, value);
    }

    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        self.strings.get(key).copied()
    }
}

pub struct Localizations {
    translations: HashMap<&'static str, Translations>,
    current_lang: String,
}

impl Default for Localizations {
    fn default() -> Self {
        Self::new()
    }
}

impl Localizations {
    /// Builds the tables and picks the language from `LANG`.
    pub fn new() -> Self {
        let mut localizer = Self::with_language(FALLBACK_LANG);
        if let Some(lang) = std::env::var("LANG").ok().and_then(|l| parse_posix_locale(&l)) {
            localizer.select(&lang);
        }
        localizer
    }

    pub fn with_language(lang: &str) -> Self {
        let mut translations = HashMap::new();

        let mut en = Translations::new();
        en.insert("panel-title", "Export");
        en.insert(
            "panel-subtitle",
            "We'll make sure the export is compliant to the platform you select.",
        );
        en.insert("platforms-label", "Platform(s)");
        en.insert("selected-count", "({count} selected)");
        en.insert("spec-format", "Format");
        en.insert("spec-resolution", "Resolution");
        en.insert("spec-duration", "Duration");
        en.insert("spec-max-size", "Max file size");
        en.insert("progress-exporting", "Exporting for {name}…");
        en.insert("progress-platform-fallback", "platform");
        en.insert("note-title", "Note");
        en.insert("note-zip", "Files will be packaged in a zip folder.");
        en.insert("note-single", "Exported as a single file.");
        en.insert(
            "note-credentials",
            "Content Credentials will be applied to all exports. Contact your admin to learn more about automated signing.",
        );
        en.insert("button-download", "Download");
        en.insert("button-download-one", "Download (1 platform)");
        en.insert("button-download-many", "Download ({count} platforms)");
        en.insert("button-exporting", "Exporting…");
        en.insert("button-complete", "Export complete");
        en.insert("button-retry", "Export failed — Try again");
        en.insert("button-cancel", "Cancel");
        translations.insert("en-US", en);

        let mut es = Translations::new();
        es.insert("panel-title", "Exportar");
        es.insert(
            "panel-subtitle",
            "Nos aseguraremos de que la exportación cumpla con la plataforma que elijas.",
        );
        es.insert("platforms-label", "Plataforma(s)");
        es.insert("selected-count", "({count} seleccionadas)");
        es.insert("spec-format", "Formato");
        es.insert("spec-resolution", "Resolución");
        es.insert("spec-duration", "Duración");
        es.insert("spec-max-size", "Tamaño máximo");
        es.insert("progress-exporting", "Exportando para {name}…");
        es.insert("progress-platform-fallback", "plataforma");
        es.insert("note-title", "Nota");
        es.insert("note-zip", "Los archivos se empaquetarán en una carpeta zip.");
        es.insert("note-single", "Se exporta como un solo archivo.");
        es.insert(
            "note-credentials",
            "Se aplicarán Content Credentials a todas las exportaciones. Contacta a tu administrador para saber más sobre la firma automática.",
        );
        es.insert("button-download", "Descargar");
        es.insert("button-download-one", "Descargar (1 plataforma)");
        es.insert("button-download-many", "Descargar ({count} plataformas)");
        es.insert("button-exporting", "Exportando…");
        es.insert("button-complete", "Exportación completa");
        es.insert("button-retry", "La exportación falló — Reintentar");
        es.insert("button-cancel", "Cancelar");
        translations.insert("es-ES", es);

        let mut localizer = Self {
            translations,
            current_lang: FALLBACK_LANG.to_string(),
        };
        localizer.select(lang);
        localizer
    }

    pub fn current_language(&self) -> &str {
        &self.current_lang
    }

    pub fn lookup_single_language(&self, key: &str, args: Option<&[(&str, String)]>) -> Option<String> {
        let template = self
            .translations
            .get(self.current_lang.as_str())
            .and_then(|t| t.lookup(key))
            .or_else(|| self.translations.get(FALLBACK_LANG).and_then(|t| t.lookup(key)))?;

        let mut text = template.to_string();
        for (name, value) in args.unwrap_or_default() {
            text = text.replace(&format!("{{{}}}", name), value);
        }
        Some(text)
    }

    /// Looks up `key`, falling back to `default` when no table has it.
    pub fn text(&self, key: &str, default: &str) -> String {
        self.lookup_single_language(key, None)
            .unwrap_or_else(|| default.to_string())
    }

    /// Selects the table for `lang`, matching on the language subtag when no
    /// exact table exists. Unknown languages fall back to English.
    pub fn select(&mut self, lang: &str) {
        if self.translations.contains_key(lang) {
            self.current_lang = lang.to_string();
            return;
        }

        let wanted = lang
            .parse::<LanguageIdentifier>()
            .map(|id| id.language.as_str().to_string())
            .unwrap_or_else(|_| lang.split('-').next().unwrap_or(lang).to_lowercase());

        let matched = self.translations.keys().copied().find(|key| {
            key.parse::<LanguageIdentifier>()
                .map(|id| id.language.as_str() == wanted)
                .unwrap_or(false)
        });

        self.current_lang = matched.unwrap_or(FALLBACK_LANG).to_string();
        debug!("UI language {} (requested {})", self.current_lang, lang);
    }
}

/// Turns `es_ES.UTF-8` style values into `es-ES`.
fn parse_posix_locale(value: &str) -> Option<String> {
    let tag = value.split(['.', '@']).next()?.replace('_', "-");
    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        return None;
    }
    tag.parse::<LanguageIdentifier>().ok().map(|id| id.to_string())
}
