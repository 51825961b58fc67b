use gpui::*;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Resolved color table consumed by the renderer.
#[derive(Clone, Debug)]
pub struct TimelineTheme {
    pub background: Hsla,
    pub alt_background: Hsla,
    pub label_column: Hsla,
    pub axis_background: Hsla,
    pub axis_line: Hsla,
    pub grid_line: Hsla,
    pub text_primary: Hsla,
    pub text_secondary: Hsla,
    pub text_muted: Hsla,
    /// Record colors indexed by importance tier - 1.
    pub importance: [Hsla; 5],
    pub selection: Hsla,
    pub badge_background: Hsla,
    pub badge_text: Hsla,
    pub scroll_indicator: Hsla,
    pub tooltip_background: Hsla,
    pub tooltip_text: Hsla,
    pub group_accents: HashMap<String, Hsla>,
    pub default_accent: Hsla,
}

impl Default for TimelineTheme {
    fn default() -> Self {
        let accents = [
            ("Gaulois", 0x8B4513),
            ("Gallo-Romains", 0xCD853F),
            ("Mérovingiens", 0x4169E1),
            ("Carolingiens", 0xDAA520),
            ("Capétiens", 0x4682B4),
            ("Valois", 0x9370DB),
            ("Bourbon", 0xDC143C),
            ("Bonaparte", 0x2F4F4F),
            ("Orléans", 0xFF8C00),
            ("République", 0x228B22),
            ("Wisigoths", 0x708090),
            ("Burgondes", 0xA0522D),
            ("Huns", 0x800000),
            ("Féodaux", 0x696969),
        ];
        Self {
            background: rgb(0x14161a).into(),
            alt_background: rgb(0x1b1e24).into(),
            label_column: rgb(0x101215).into(),
            axis_background: rgb(0x0d0f12).into(),
            axis_line: gpui::white().alpha(0.25),
            grid_line: gpui::white().alpha(0.07),
            text_primary: gpui::white().alpha(0.92),
            text_secondary: gpui::white().alpha(0.7),
            text_muted: gpui::white().alpha(0.45),
            importance: [
                rgb(0x6b7280).into(),
                rgb(0x60a5fa).into(),
                rgb(0x34d399).into(),
                rgb(0xfbbf24).into(),
                rgb(0xf87171).into(),
            ],
            selection: rgb(0xf472b6).into(),
            badge_background: gpui::white().alpha(0.18),
            badge_text: gpui::white(),
            scroll_indicator: gpui::white().alpha(0.3),
            tooltip_background: gpui::black().alpha(0.85),
            tooltip_text: gpui::white(),
            group_accents: accents
                .into_iter()
                .map(|(name, hex)| (name.to_string(), rgb(hex).into()))
                .collect(),
            default_accent: rgb(0x808080).into(),
        }
    }
}

impl TimelineTheme {
    pub fn importance_color(&self, tier: u8) -> Hsla {
        let idx = (tier.clamp(1, 5) - 1) as usize;
        self.importance[idx]
    }

    pub fn group_accent(&self, key: &str) -> Hsla {
        self.group_accents
            .get(key)
            .copied()
            .unwrap_or(self.default_accent)
    }
}

/// Lazily resolved theme shared by everything that paints.
///
/// The table is resolved on first read and kept until [`ThemeCache::invalidate`].
pub struct ThemeCache {
    resolved: RwLock<Option<Arc<TimelineTheme>>>,
    resolver: Box<dyn Fn() -> TimelineTheme + Send + Sync>,
}

impl ThemeCache {
    pub fn new(resolver: impl Fn() -> TimelineTheme + Send + Sync + 'static) -> Self {
        Self {
            resolved: RwLock::new(None),
            resolver: Box::new(resolver),
        }
    }

    pub fn get(&self) -> Arc<TimelineTheme> {
        if let Some(theme) = self.resolved.read().as_ref() {
            return theme.clone();
        }
        let mut slot = self.resolved.write();
        slot.get_or_insert_with(|| {
            tracing::debug!("resolving timeline theme");
            Arc::new((self.resolver)())
        })
        .clone()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.read().is_some()
    }

    /// Drops the cached table; the next read resolves it again.
    pub fn invalidate(&self) {
        tracing::info!("timeline theme invalidated");
        *self.resolved.write() = None;
    }
}

impl Default for ThemeCache {
    fn default() -> Self {
        Self::new(TimelineTheme::default)
    }
}

impl std::fmt::Debug for ThemeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeCache")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
