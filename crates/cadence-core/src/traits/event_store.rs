use crate::errors::TimingResult;
use crate::models::{ContactInfo, EngagementEvent, OrganizationScheduleProfile};

/// Adapter over the persistent store holding engagement events and
/// organization profiles. Implementations own all I/O.
pub trait EventStore: Send + Sync {
    /// Up to `limit` most recent events for a contact, newest first.
    fn engagement_history(
        &self,
        contact_id: &str,
        limit: usize,
    ) -> TimingResult<Vec<EngagementEvent>>;

    /// The schedule profile of an organization, if one has been recorded.
    fn organization_profile(
        &self,
        organization_id: &str,
    ) -> TimingResult<Option<OrganizationScheduleProfile>>;

    /// Directory entry for a contact. `None` means the contact is unknown.
    fn contact_info(&self, contact_id: &str) -> TimingResult<Option<ContactInfo>>;

    /// Up to `limit` most recent events across all contacts of an organization.
    fn organization_engagements(
        &self,
        organization_id: &str,
        limit: usize,
    ) -> TimingResult<Vec<EngagementEvent>>;
}

impl<T: EventStore + ?Sized> EventStore for std::sync::Arc<T> {
    fn engagement_history(
        &self,
        contact_id: &str,
        limit: usize,
    ) -> TimingResult<Vec<EngagementEvent>> {
        (**self).engagement_history(contact_id, limit)
    }

    fn organization_profile(
        &self,
        organization_id: &str,
    ) -> TimingResult<Option<OrganizationScheduleProfile>> {
        (**self).organization_profile(organization_id)
    }

    fn contact_info(&self, contact_id: &str) -> TimingResult<Option<ContactInfo>> {
        (**self).contact_info(contact_id)
    }

    fn organization_engagements(
        &self,
        organization_id: &str,
        limit: usize,
    ) -> TimingResult<Vec<EngagementEvent>> {
        (**self).organization_engagements(organization_id, limit)
    }
}
