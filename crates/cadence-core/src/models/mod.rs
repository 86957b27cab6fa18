mod contact;
mod engagement;
mod insights;
mod norms;
mod prediction;
mod schedule;
mod time_range;

pub use contact::ContactInfo;
pub use engagement::{Channel, EngagementAction, EngagementEvent, Outcome};
pub use insights::{
    ChannelPerformance, DayEngagementStat, HourEngagementStat, PracticeInsights,
};
pub use norms::{DomainNorm, DomainNormTable, ScoredRange, BUILTIN_NORMS_VERSION};
pub use prediction::{
    CampaignOptions, ChannelPreference, Impact, ReasoningFactor, TimeWindow, TimingPrediction,
    Urgency,
};
pub use schedule::{
    BusyPeriod, CommunicationPreference, DaySchedule, OrganizationScheduleProfile,
    PreferenceSource, SeasonalAdjustment,
};
pub use time_range::{minute_of_day, TimeRange};
