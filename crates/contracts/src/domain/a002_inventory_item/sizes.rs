use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Закрытый перечень размеров
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SizeLabel {
    XS,
    S,
    M,
    L,
    XL,
    XXL,
    #[serde(rename = "3XL")]
    Xxxl,
}

impl SizeLabel {
    pub fn all() -> [SizeLabel; 7] {
        [
            SizeLabel::XS,
            SizeLabel::S,
            SizeLabel::M,
            SizeLabel::L,
            SizeLabel::XL,
            SizeLabel::XXL,
            SizeLabel::Xxxl,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeLabel::XS => "XS",
            SizeLabel::S => "S",
            SizeLabel::M => "M",
            SizeLabel::L => "L",
            SizeLabel::XL => "XL",
            SizeLabel::XXL => "XXL",
            SizeLabel::Xxxl => "3XL",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|label| label.as_str() == s)
    }
}

impl std::fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Остатки по размерам. Отсутствующий размер читается как 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sizes(BTreeMap<SizeLabel, u32>);

impl Sizes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(SizeLabel, u32)]) -> Self {
        Self(pairs.iter().copied().collect())
    }

    pub fn get(&self, size: SizeLabel) -> u32 {
        self.0.get(&size).copied().unwrap_or(0)
    }

    pub fn set(&mut self, size: SizeLabel, quantity: u32) {
        self.0.insert(size, quantity);
    }

    /// Все размеры перечня в фиксированном порядке, включая нулевые
    pub fn iter_all(&self) -> impl Iterator<Item = (SizeLabel, u32)> + '_ {
        SizeLabel::all().into_iter().map(move |size| (size, self.get(size)))
    }
}

/// Суммарный остаток по всем размерам
pub fn calculate_total_quantity(sizes: &Sizes) -> u64 {
    SizeLabel::all()
        .into_iter()
        .map(|size| u64::from(sizes.get(size)))
        .sum()
}
