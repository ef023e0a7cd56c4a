/// Shop configuration supplied by the host's plugin parameters.
///
/// Passed explicitly into the cost builder and registry so parsing stays a
/// pure function of `(note text, configuration)`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShopConfig {
    /// Gold cost applied to every entry that has no `<buy cost gold: N>` tag.
    pub default_price: u32,

    /// Label shown above the cost list in the shop window.
    pub requirements_text: String,
}

impl ShopConfig {
    /// Plugin name under which the host stores these parameters.
    pub const PLUGIN_NAME: &'static str = "YED_SkillShop";

    // ===== host parameter keys =====
    pub const DEFAULT_PRICE_KEY: &'static str = "Default Price";
    pub const REQUIREMENTS_TEXT_KEY: &'static str = "Requirements Text";

    // ===== defaults =====
    pub const DEFAULT_PRICE: u32 = 100;
    pub const DEFAULT_REQUIREMENTS_TEXT: &'static str = "Requirements";

    pub fn new() -> Self {
        Self {
            default_price: Self::DEFAULT_PRICE,
            requirements_text: Self::DEFAULT_REQUIREMENTS_TEXT.to_string(),
        }
    }

    pub fn with_default_price(mut self, default_price: u32) -> Self {
        self.default_price = default_price;
        self
    }

    pub fn with_requirements_text(mut self, requirements_text: impl Into<String>) -> Self {
        self.requirements_text = requirements_text.into();
        self
    }
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self::new()
    }
}
