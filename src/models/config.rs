use crate::assets::AssetLoader;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding bitmaps, ledgers and the catalog documents
    pub work_dir: PathBuf,

    /// Page served at `/`, relative to `work_dir`
    pub index_page: String,

    /// Program ledger with the `.BAS`/`.INI` blocks
    pub program_ledger: String,

    /// Auto-run ledger with the copy directives
    pub autorun_ledger: String,

    pub placement_defaults: PlacementDefaults,

    /// Bitmaps listed nowhere but still exported (case-sensitive prefixes)
    pub hidden_prefixes: Vec<String>,

    /// Bitmaps never listed nor exported (case-insensitive prefixes)
    pub ignored_prefixes: Vec<String>,

    /// Codes printed on the small 40x27 label stock
    pub fixed_size_codes: Vec<String>,

    pub fixed_size_category: String,

    /// Code prefix to category name
    pub categories: BTreeMap<String, String>,

    /// Category name to icon shown in the catalog
    pub category_icons: BTreeMap<String, String>,

    pub catalog: CatalogConfig,

    pub export: ExportConfig,
}

/// Print position used when the ledger has none recorded
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct PlacementDefaults {
    pub x: u32,
    pub y: u32,
}

impl Default for PlacementDefaults {
    fn default() -> Self {
        Self { x: 22, y: 22 }
    }
}

/// Catalog document generation
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CatalogConfig {
    /// Hand-written manual the catalogue section is appended to
    pub source: String,

    /// Generated document, written next to the source
    pub output: String,

    /// Everything from this heading on is replaced
    pub marker: String,

    /// Tera template rendering the catalogue section
    pub template: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: "manuel_brother_td4t.html".to_string(),
            output: "manuel_brother_td4t_generated.html".to_string(),
            marker: "<h2>📊 Catalogue des Templates".to_string(),
            template: "catalog.html.tera".to_string(),
        }
    }
}

/// USB export
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExportConfig {
    /// Copied along with the bitmaps and both ledgers
    pub extra_files: Vec<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            extra_files: vec!["AUTO.TXT".to_string()],
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        work_dir = %config.work_dir.display(),
                        categories = config.categories.len(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Load from assets, then apply the `WORK_DIR` override.
    pub fn load(loader: &AssetLoader) -> Self {
        let config = Self::load_from_assets(loader);
        match std::env::var("WORK_DIR") {
            Ok(dir) if !dir.is_empty() => config.with_work_dir(dir),
            _ => config,
        }
    }

    /// Replace `work_dir`, e.g. from the `WORK_DIR` environment variable.
    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }

    /// Resolve a file name against `work_dir`.
    pub fn path(&self, file_name: &str) -> PathBuf {
        self.work_dir.join(file_name)
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn program_ledger_path(&self) -> PathBuf {
        self.path(&self.program_ledger)
    }

    pub fn autorun_ledger_path(&self) -> PathBuf {
        self.path(&self.autorun_ledger)
    }

    /// Hidden bitmaps stay out of listings and the catalog.
    pub fn is_hidden(&self, file_name: &str) -> bool {
        self.hidden_prefixes
            .iter()
            .any(|prefix| file_name.starts_with(prefix.as_str()))
    }

    /// Ignored bitmaps are never listed nor exported.
    pub fn is_ignored(&self, file_name: &str) -> bool {
        let upper = file_name.to_uppercase();
        self.ignored_prefixes
            .iter()
            .any(|prefix| upper.starts_with(&prefix.to_uppercase()))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let categories = [
            ("ABA", "ABATTAGE"),
            ("AMO", "AMOUR"),
            ("BAR", "BARBECUE"),
            ("BOU", "BOUCHERIE"),
            ("COM", "COMPOSITION"),
            ("FET", "FÊTES"),
            ("FRA", "FRAICHE DECOUPE"),
            ("M", "MAISON"),
            ("MAI", "MAISON"),
            ("MAR", "MAREE"),
            ("ORI", "ORIGINE"),
            ("PIZ", "PIZZA"),
            ("PRE", "PREPARATION"),
            ("PRI", "PRIX"),
            ("PR", "PROMO"),
            ("PRO", "PROMO"),
            ("VIA", "VIA"),
        ];
        let icons = [
            ("ABATTAGE", "🏪"),
            ("AMOUR", "❤️"),
            ("BARBECUE", "🍺"),
            ("BOUCHERIE", "🥩"),
            ("COMPOSITION", "📋"),
            ("FÊTES", "🎄"),
            ("FRAICHE DECOUPE", "🔪"),
            ("MAISON", "🏠"),
            ("MARCHÉ", "🏷️"),
            ("MAREE", "🐟"),
            ("ORIGINE", "🌟"),
            ("PIZZA", "🍕"),
            ("PREPARATION", "👨‍🍳"),
            ("PROMO", "💰"),
            ("VIA", "🚚"),
        ];

        Self {
            work_dir: PathBuf::from("."),
            index_page: "template_manager.html".to_string(),
            program_ledger: "Prog_Gestmag.BAS".to_string(),
            autorun_ledger: "AUTO.BAS".to_string(),
            placement_defaults: PlacementDefaults::default(),
            hidden_prefixes: vec!["Logo_GM".to_string(), ".".to_string()],
            ignored_prefixes: vec!["USB".to_string()],
            fixed_size_codes: ["1", "2", "3", "4", "5", "10"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fixed_size_category: "40x27".to_string(),
            categories: categories
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            category_icons: icons
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            catalog: CatalogConfig::default(),
            export: ExportConfig::default(),
        }
    }
}
