//! Printable template catalog.
//!
//! The catalog is rebuilt from scratch on every run: bitmaps are scanned and
//! grouped by category, and the section is appended to the hand-written part
//! of the manual (everything before the catalog heading).

use chrono::{Local, Locale, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tera::{Context, Tera};

use crate::assets::AssetLoader;
use crate::error::TemplateError;
use crate::models::AppConfig;
use crate::services::categories::{classify, icon_for, number_of};
use crate::services::workspace::{code_of, read_optional, scan_bitmaps, write_atomic, BitmapScan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogReport {
    pub total_templates: usize,
    pub categories: usize,
    /// Output file name relative to the working directory
    pub file_path: String,
}

#[derive(Debug, Clone, Serialize)]
struct CatalogEntry {
    code: String,
    file: String,
    #[serde(skip)]
    number: u64,
}

#[derive(Debug, Clone, Serialize)]
struct CatalogGroup {
    name: String,
    prefix: String,
    icon: String,
    entries: Vec<CatalogEntry>,
}

pub struct CatalogBuilder {
    config: Arc<AppConfig>,
    assets: Arc<AssetLoader>,
}

impl CatalogBuilder {
    pub fn new(config: Arc<AppConfig>, assets: Arc<AssetLoader>) -> Self {
        Self { config, assets }
    }

    /// Regenerate the catalog dated today.
    pub fn generate(&self) -> Result<CatalogReport, TemplateError> {
        self.generate_on(Local::now().date_naive())
    }

    pub fn generate_on(&self, date: NaiveDate) -> Result<CatalogReport, TemplateError> {
        let config = &self.config;
        let files = scan_bitmaps(config, BitmapScan::Templates)?;
        let total = files.len();
        let groups = self.group(files);

        let source_path = config.path(&config.catalog.source);
        let source = read_optional(&source_path)?.ok_or_else(|| {
            TemplateError::NotFound(format!(
                "catalog source {} not found",
                source_path.display()
            ))
        })?;
        let header = match source.find(&config.catalog.marker) {
            Some(idx) => &source[..idx],
            None => {
                tracing::warn!(marker = %config.catalog.marker, "Catalog marker missing, appending to whole document");
                source.as_str()
            }
        };

        let section = self.render(&groups, total, date)?;

        let output_path = config.path(&config.catalog.output);
        write_atomic(&output_path, format!("{header}{section}").as_bytes())?;

        tracing::info!(
            templates = total,
            categories = groups.len(),
            path = %output_path.display(),
            "Catalog generated"
        );

        Ok(CatalogReport {
            total_templates: total,
            categories: groups.len(),
            file_path: config.catalog.output.clone(),
        })
    }

    /// Group bitmaps by category, sorted by name, entries by number.
    fn group(&self, files: Vec<String>) -> Vec<CatalogGroup> {
        let mut groups: BTreeMap<String, CatalogGroup> = BTreeMap::new();

        for file in files {
            let code = code_of(&file);
            let class = classify(&self.config, &code);
            let group = groups
                .entry(class.category.clone())
                .or_insert_with(|| CatalogGroup {
                    icon: icon_for(&self.config, &class.category).to_string(),
                    name: class.category.clone(),
                    prefix: class.prefix.clone(),
                    entries: Vec::new(),
                });
            // PR and PRO both map to PROMO: show the longer one
            if class.prefix.len() > group.prefix.len() {
                group.prefix = class.prefix;
            }
            group.entries.push(CatalogEntry {
                number: number_of(&code),
                code,
                file,
            });
        }

        groups
            .into_values()
            .map(|mut group| {
                group.entries.sort_by_key(|entry| entry.number);
                group
            })
            .collect()
    }

    fn render(
        &self,
        groups: &[CatalogGroup],
        total: usize,
        date: NaiveDate,
    ) -> Result<String, TemplateError> {
        let name = &self.config.catalog.template;
        let template = self
            .assets
            .read_template_string(name)
            .map_err(|e| TemplateError::io(name, e))?;

        let mut tera = Tera::default();
        tera.add_raw_template(name, &template)?;

        let mut context = Context::new();
        context.insert("groups", groups);
        context.insert("total", &total);
        context.insert("date", &format_date(date));

        Ok(tera.render(name, &context)?)
    }
}

/// `19 octobre 2026`
pub fn format_date(date: NaiveDate) -> String {
    date.format_localized("%d %B %Y", Locale::fr_FR).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MANUAL: &str = "<html><body><div>\n<h1>Manuel</h1>\n<h2>📊 Catalogue des Templates (3 modèles disponibles)</h2>\nstale\n";

    fn builder(dir: &TempDir) -> CatalogBuilder {
        CatalogBuilder::new(
            Arc::new(AppConfig::default().with_work_dir(dir.path())),
            Arc::new(AssetLoader::new(None, None)),
        )
    }

    fn touch(dir: &TempDir, names: &[&str]) {
        for name in names {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()
    }

    #[test]
    fn test_format_date_french() {
        assert_eq!(format_date(date()), "07 mars 2026");
    }

    #[test]
    fn test_missing_source_is_not_found() {
        let dir = TempDir::new().unwrap();
        touch(&dir, &["bar1.bmp"]);
        let err = builder(&dir).generate_on(date()).unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(_)));
    }

    #[test]
    fn test_generate_replaces_catalog_section() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("manuel_brother_td4t.html"), MANUAL).unwrap();
        touch(&dir, &["bar10.bmp", "bar2.bmp", "pr1.bmp", "pro3.bmp", "10.bmp", "Logo_GM.bmp", "usb.bmp"]);

        let report = builder(&dir).generate_on(date()).unwrap();
        assert_eq!(report.total_templates, 5);
        assert_eq!(report.categories, 3);
        assert_eq!(report.file_path, "manuel_brother_td4t_generated.html");

        let html = fs::read_to_string(dir.path().join("manuel_brother_td4t_generated.html")).unwrap();
        assert!(html.starts_with("<html><body><div>\n<h1>Manuel</h1>\n<h2>📊 Catalogue des Templates (5 modèles disponibles)</h2>"));
        assert!(!html.contains("stale"));
        assert!(html.contains("🍺 BARBECUE (BAR) - 2 modèles"));
        assert!(html.contains("💰 PROMO (PRO) - 2 modèles"));
        assert!(html.contains("📦 40x27 (40x27) - 1 modèles"));
        assert!(html.contains("Document généré automatiquement le 07 mars 2026"));
        assert!(html.contains("5 modèles indexés"));
        assert!(!html.contains("Logo_GM"));

        // categories by name, entries by number
        let pos = |needle: &str| html.find(needle).unwrap();
        assert!(pos("40x27 (40x27)") < pos("BARBECUE (BAR)"));
        assert!(pos("BARBECUE (BAR)") < pos("PROMO (PRO)"));
        assert!(pos("alt=\"BAR2\"") < pos("alt=\"BAR10\""));
        assert!(html.contains("<img src=\"bar2.bmp\" alt=\"BAR2\">"));
    }

    #[test]
    fn test_generate_without_marker_keeps_whole_document() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("manuel_brother_td4t.html"), "<p>intro</p>\n").unwrap();

        let report = builder(&dir).generate_on(date()).unwrap();
        assert_eq!(report.total_templates, 0);

        let html = fs::read_to_string(dir.path().join("manuel_brother_td4t_generated.html")).unwrap();
        assert!(html.starts_with("<p>intro</p>\n<h2>📊 Catalogue des Templates (0 modèles disponibles)</h2>"));
    }

    #[test]
    fn test_regenerating_is_stable() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("manuel_brother_td4t.html"), MANUAL).unwrap();
        touch(&dir, &["piz1.bmp"]);

        let b = builder(&dir);
        b.generate_on(date()).unwrap();
        let first = fs::read_to_string(dir.path().join("manuel_brother_td4t_generated.html")).unwrap();
        b.generate_on(date()).unwrap();
        let second = fs::read_to_string(dir.path().join("manuel_brother_td4t_generated.html")).unwrap();
        assert_eq!(first, second);
    }
}
