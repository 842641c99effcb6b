//! Theme engine with Tera templates.
//!
//! Renders listing cards for partial-page updates. Tera's HTML
//! auto-escaping neutralizes listing-supplied text before it reaches
//! the markup.

use std::path::Path;

use anyhow::{Context, Result};
use tera::Tera;
use tracing::debug;

use crate::models::ListingWithCategory;

/// Card template rendered once per listing.
const CARD_TEMPLATE: &str = "listing-card.html";

/// Fallback fragment rendered when a listing query fails.
const ERROR_TEMPLATE: &str = "fragment-error.html";

/// Last-resort error fragment when even the template is unavailable.
const ERROR_FALLBACK: &str = r#"<div class="col-span-full text-center py-12">
  <p class="text-red-600 dark:text-red-400">Ett fel uppstod vid hämtning av listningar.</p>
</div>"#;

/// Theme engine for rendering templates.
pub struct ThemeEngine {
    tera: Tera,
}

impl ThemeEngine {
    /// Create a new theme engine loading templates from the given directory.
    pub fn new(template_dir: &Path) -> Result<Self> {
        let pattern = template_dir.join("**/*.html");
        let pattern_str = pattern
            .to_str()
            .context("invalid template directory path")?;

        let mut tera = Tera::new(pattern_str).context("failed to initialize Tera templates")?;

        Self::register_filters(&mut tera);

        let template_names: Vec<_> = tera.get_template_names().collect();
        debug!(count = template_names.len(), "loaded templates");

        Ok(Self { tera })
    }

    /// Register custom Tera filters.
    fn register_filters(tera: &mut Tera) {
        // Filter for formatting a monthly price: whole amounts without
        // decimals, fractional amounts with two.
        tera.register_filter(
            "money",
            |value: &tera::Value, _args: &std::collections::HashMap<String, tera::Value>| {
                let Some(amount) = value.as_f64() else {
                    return Ok(tera::Value::String(String::new()));
                };

                let formatted = if amount.fract() == 0.0 {
                    format!("{amount:.0}")
                } else {
                    format!("{amount:.2}")
                };

                Ok(tera::Value::String(formatted))
            },
        );
    }

    /// Render one card per listing and join them into a fragment.
    pub fn render_listing_cards(&self, listings: &[ListingWithCategory]) -> Result<String> {
        let mut cards = Vec::with_capacity(listings.len());

        for listing in listings {
            let mut context = tera::Context::new();
            context.insert("listing", listing);

            let card = self
                .tera
                .render(CARD_TEMPLATE, &context)
                .context("failed to render listing card")?;
            cards.push(card);
        }

        Ok(cards.join("\n"))
    }

    /// Localized fallback fragment for failed listing queries.
    pub fn error_fragment(&self) -> String {
        self.tera
            .render(ERROR_TEMPLATE, &tera::Context::new())
            .unwrap_or_else(|_| ERROR_FALLBACK.to_string())
    }
}
