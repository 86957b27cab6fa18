//! Campaign batches: contacts are predicted in groups, each group in
//! parallel, one group after another.

use std::collections::HashMap;

use cadence_core::errors::TimingResult;
use cadence_core::models::{CampaignOptions, Channel, TimingPrediction};
use cadence_core::traits::EventStore;
use cadence_observability::events;
use rayon::prelude::*;

use crate::engine::TimingEngine;

/// Per-member results of a batch, in input order.
#[derive(Debug)]
pub struct BatchOutcome {
    pub results: Vec<(String, TimingResult<TimingPrediction>)>,
    /// Size of each sequential group.
    pub group_sizes: Vec<usize>,
}

impl BatchOutcome {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    /// Successful predictions keyed by contact.
    pub fn into_predictions(self) -> HashMap<String, TimingPrediction> {
        self.results
            .into_iter()
            .filter_map(|(contact, result)| result.ok().map(|p| (contact, p)))
            .collect()
    }
}

impl<S: EventStore> TimingEngine<S> {
    /// Predict for every contact. Failed members are logged and omitted.
    pub fn optimal_send_window(
        &self,
        contact_ids: &[String],
        channel: Channel,
        options: &CampaignOptions,
    ) -> HashMap<String, TimingPrediction> {
        self.try_optimal_send_window(contact_ids, channel, options)
            .into_predictions()
    }

    /// Predict for every contact, keeping each member's result.
    ///
    /// All members share one request time. Groups of `engine.batch_size`
    /// run in parallel; a group finishes before the next starts.
    pub fn try_optimal_send_window(
        &self,
        contact_ids: &[String],
        channel: Channel,
        options: &CampaignOptions,
    ) -> BatchOutcome {
        let group_size = self.config().engine.batch_size.max(1);
        let span = cadence_observability::batch_span!(contact_ids.len(), group_size);
        let _guard = span.enter();
        tracing::debug!(
            content_type = %options.content_type,
            urgency = %options.urgency,
            "batch started"
        );

        let now = self.now();
        let mut outcome = BatchOutcome {
            results: Vec::with_capacity(contact_ids.len()),
            group_sizes: Vec::new(),
        };

        for (index, group) in contact_ids.chunks(group_size).enumerate() {
            let results: Vec<(String, TimingResult<TimingPrediction>)> = group
                .par_iter()
                .map(|contact_id| {
                    let result = self.predict_at(contact_id, channel, options.urgency, now);
                    if let Err(err) = &result {
                        events::batch_member_failed(contact_id, &err.to_string());
                    }
                    (contact_id.clone(), result)
                })
                .collect();

            let failed = results.iter().filter(|(_, r)| r.is_err()).count();
            events::batch_group_completed(index, group.len(), failed);
            outcome.group_sizes.push(group.len());
            outcome.results.extend(results);
        }

        outcome
    }
}
