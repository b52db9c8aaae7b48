/// Calendar month. The `EnumSetType` derive makes `EnumSet<Month>` the
/// natural representation for the engine's month filters.
#[derive(Debug, clap::ValueEnum, enumset::EnumSetType)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Self; 12] = [
        Self::Jan,
        Self::Feb,
        Self::Mar,
        Self::Apr,
        Self::May,
        Self::Jun,
        Self::Jul,
        Self::Aug,
        Self::Sep,
        Self::Oct,
        Self::Nov,
        Self::Dec,
    ];

    /// Calendar number, `1..=12`.
    pub const fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn from_number(number: u32) -> Option<Self> {
        (1..=12).contains(&number).then(|| Self::ALL[(number - 1) as usize])
    }

    /// The month `steps` months later, wrapping from December to January.
    pub fn step(self, steps: u32) -> Self {
        Self::ALL[(self as usize + steps as usize) % 12]
    }

    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Jan => "Jan",
            Self::Feb => "Feb",
            Self::Mar => "Mar",
            Self::Apr => "Apr",
            Self::May => "May",
            Self::Jun => "Jun",
            Self::Jul => "Jul",
            Self::Aug => "Aug",
            Self::Sep => "Sep",
            Self::Oct => "Oct",
            Self::Nov => "Nov",
            Self::Dec => "Dec",
        }
    }
}
