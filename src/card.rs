use rand::SeedableRng as _;
use rand::rngs::StdRng;

use crate::background;
use crate::compose;
use crate::error::CardResult;
use crate::fetch::ByteFetcher;
use crate::font::FontCache;
use crate::layout;
use crate::model::{CardConfig, HAnchor, PlacementDirective, Rgb, VAnchor};
use crate::normalize::normalize;

/// Calendar fields supplied by the external calendar-info collaborator.
///
/// The engine formats and places these strings; it never derives them.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CalendarInfo {
    pub day: u32,
    pub month: u32,
    pub year: u32,
    /// Sexagenary (gan-zhi) year/month/day string.
    pub sexagenary: String,
    pub quote: String,
}

/// Finished card plus its wire content type.
#[derive(Clone, Debug)]
pub struct EncodedCard {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
}

/// Resolves the quote field, substituting the configured fallback when the
/// collaborator failed. This is the only place in the pipeline where an
/// error does not abort the run.
pub fn quote_or_fallback(fetched: CardResult<String>, fallback: &str) -> String {
    match fetched {
        Ok(quote) if !quote.trim().is_empty() => quote,
        Ok(_) => fallback.to_string(),
        Err(err) => {
            tracing::warn!(%err, "quote fetch failed, using fallback");
            fallback.to_string()
        }
    }
}

/// Builds the ordered directive list for one card.
///
/// Order matters: runs are painted first to last. The quote is split into
/// two stacked lines when it exceeds the configured character threshold.
pub fn assemble_directives(info: &CalendarInfo, config: &CardConfig) -> Vec<PlacementDirective> {
    let mut directives = vec![
        PlacementDirective::new(
            format!("{:02}", info.day),
            245.0,
            VAnchor::Bottom(700),
            HAnchor::Left(80),
            Rgb::WHITE,
        ),
        PlacementDirective::new(
            format!("{}月 {}", info.month, info.year),
            65.0,
            VAnchor::Bottom(590),
            HAnchor::Left(80),
            Rgb::WHITE,
        ),
        PlacementDirective::new(
            info.sexagenary.clone(),
            65.0,
            VAnchor::Bottom(510),
            HAnchor::Left(80),
            Rgb::WHITE,
        ),
    ];

    let (head, tail) = layout::split_overflow(&info.quote, config.quote_split_threshold);
    directives.push(PlacementDirective::new(
        head,
        50.0,
        VAnchor::Bottom(config.quote_line1_offset),
        HAnchor::Left(config.quote_line1_inset),
        Rgb::WHITE,
    ));
    if let Some(tail) = tail {
        directives.push(PlacementDirective::new(
            tail,
            50.0,
            VAnchor::Bottom(config.quote_line2_offset),
            HAnchor::Left(config.quote_line2_inset),
            Rgb::WHITE,
        ));
    }

    directives
}

/// Orchestrates one card generation: font -> background -> normalize ->
/// layout -> composite -> encode.
///
/// Each call owns its canvas; the on-disk font cache is the only state
/// shared between calls. Any stage failure aborts the run with no partial
/// output.
pub struct CardAssembler<F> {
    fetcher: F,
    fonts: FontCache,
    config: CardConfig,
}

impl<F: ByteFetcher> CardAssembler<F> {
    pub fn new(fetcher: F, config: CardConfig) -> Self {
        let fonts = FontCache::new(config.font_url.clone(), config.font_cache_path.clone());
        Self {
            fetcher,
            fonts,
            config,
        }
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Generates one card with a fresh thread-local random pick.
    pub async fn generate(&self, info: &CalendarInfo) -> CardResult<EncodedCard> {
        self.generate_seeded(info, rand::random()).await
    }

    /// Generates one card with a caller-supplied seed for the background
    /// pick, making the whole run reproducible.
    #[tracing::instrument(skip(self, info), fields(day = info.day, month = info.month))]
    pub async fn generate_seeded(&self, info: &CalendarInfo, seed: u64) -> CardResult<EncodedCard> {
        let font = self.fonts.ensure(&self.fetcher).await?;

        let candidates =
            background::fetch_candidates(&self.fetcher, &self.config.background_list_url).await?;
        let mut rng = StdRng::seed_from_u64(seed);
        let raw = background::resolve(&self.fetcher, &candidates, &mut rng).await?;

        let (w, h) = (self.config.canvas_width, self.config.canvas_height);
        let mut canvas = normalize(&raw, w, h)?;

        let directives = assemble_directives(info, &self.config);
        let runs = layout::layout_all(w, h, &directives, &font)?;
        compose::paint(&mut canvas, &runs, &font)?;

        let bytes = compose::encode_jpeg(&canvas)?;
        tracing::info!(len = bytes.len(), "card encoded");
        Ok(EncodedCard {
            bytes,
            mime: "image/jpeg",
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::error::CardError;

    use super::*;

    fn info(quote: &str) -> CalendarInfo {
        CalendarInfo {
            day: 3,
            month: 9,
            year: 2026,
            sexagenary: "丙午年 丁酉月 壬子日".to_string(),
            quote: quote.to_string(),
        }
    }

    #[test]
    fn short_quote_yields_four_directives() {
        let directives = assemble_directives(&info("海内存知己"), &CardConfig::default());
        assert_eq!(directives.len(), 4);
        assert_eq!(directives[0].text, "03");
        assert_eq!(directives[1].text, "9月 2026");
        assert_eq!(directives[3].text, "海内存知己");
        assert_eq!(directives[3].v, VAnchor::Bottom(300));
        assert_eq!(directives[3].h, HAnchor::Left(80));
    }

    #[test]
    fn long_quote_splits_into_two_stacked_lines() {
        let quote = format!("{}与", "行路难行路难多歧路今安在长风破浪会有时直挂");
        assert_eq!(quote.chars().count(), 22);

        let directives = assemble_directives(&info(&quote), &CardConfig::default());
        assert_eq!(directives.len(), 5);

        let line1 = &directives[3];
        let line2 = &directives[4];
        assert_eq!(line1.text.chars().count(), 21);
        assert_eq!(line2.text, "与");
        assert_eq!(format!("{}{}", line1.text, line2.text), quote);
        assert_eq!(line1.v, VAnchor::Bottom(300));
        assert_eq!(line1.h, HAnchor::Left(80));
        assert_eq!(line2.v, VAnchor::Bottom(250));
        assert_eq!(line2.h, HAnchor::Left(30));
    }

    #[test]
    fn day_label_is_zero_padded() {
        let directives = assemble_directives(&info("x"), &CardConfig::default());
        assert_eq!(directives[0].text, "03");
        assert_eq!(directives[0].size, 245.0);
    }

    #[test]
    fn quote_fallback_applies_on_error_and_blank() {
        let fallback = "天之道，损有余而补不足。";
        assert_eq!(
            quote_or_fallback(Err(CardError::fetch("down")), fallback),
            fallback
        );
        assert_eq!(quote_or_fallback(Ok("  ".to_string()), fallback), fallback);
        assert_eq!(
            quote_or_fallback(Ok("长风破浪会有时".to_string()), fallback),
            "长风破浪会有时"
        );
    }
}
