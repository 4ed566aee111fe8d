//! Single-year entity pages.
//!
//! One primary snapshot fetch, then every counterparty role of the entity
//! kind is resolved and joined. Roles share a composition-wide lookup plan:
//! each role gets a batch of the ids only it names, ids named by several
//! roles go to one shared batch, and all batches run concurrently. Each id
//! is resolved once. A role fails only when its own batch fails, or when
//! the shared batch fails and the role reads from it.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use fecview_client::ViewService;
use fecview_client::proto::EntityRequest;
use fecview_core::{
    AmountRecord, Bucket, CandidateSummary, Committee, CommitteeTxSummary, EnrichedCounterparty,
    IndividualSummary, ResolvedRecord, TransactionCounts,
};
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use crate::ComposeError;
use crate::joiner::{MissingCountPolicy, join};
use crate::links::{LinkBuilder, YearLink};
use crate::resolver::LookupResolver;
use crate::section::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterpartyRole {
    Senders,
    Recipients,
    DirectSenders,
    DirectRecipients,
    TopIndividualContributors,
    TopCommitteeContributors,
    TransferRecipients,
    TopExpenditureRecipients,
}

impl CounterpartyRole {
    pub fn heading(self) -> &'static str {
        match self {
            CounterpartyRole::Senders => "Senders",
            CounterpartyRole::Recipients => "Recipients",
            CounterpartyRole::DirectSenders => "Direct Senders",
            CounterpartyRole::DirectRecipients => "Direct Recipients",
            CounterpartyRole::TopIndividualContributors => "Top Individual Contributors",
            CounterpartyRole::TopCommitteeContributors => "Top Committee Contributors",
            CounterpartyRole::TransferRecipients => "Transfer Recipients",
            CounterpartyRole::TopExpenditureRecipients => "Top Expenditure Recipients",
        }
    }
}

/// A joined counterparty ready to render, linked to its own entity page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterpartyRow {
    #[serde(flatten)]
    pub entry: EnrichedCounterparty,
    pub line: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleSection {
    pub role: CounterpartyRole,
    pub heading: &'static str,
    pub content: Section<Vec<CounterpartyRow>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndividualView {
    pub year: String,
    pub summary: IndividualSummary,
    pub years: Vec<YearLink>,
    pub senders: RoleSection,
    pub recipients: RoleSection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitteeView {
    pub year: String,
    pub committee: Committee,
    pub tx: CommitteeTxSummary,
    pub years: Vec<YearLink>,
    pub top_individual_contributors: RoleSection,
    pub top_committee_contributors: RoleSection,
    pub transfer_recipients: RoleSection,
    pub top_expenditure_recipients: RoleSection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateView {
    pub year: String,
    pub summary: CandidateSummary,
    pub years: Vec<YearLink>,
    pub direct_senders: RoleSection,
    pub direct_recipients: RoleSection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityView {
    Individual(IndividualView),
    Committee(CommitteeView),
    Candidate(CandidateView),
}

impl EntityView {
    /// Role sections in display order.
    pub fn sections(&self) -> Vec<&RoleSection> {
        match self {
            EntityView::Individual(v) => vec![&v.senders, &v.recipients],
            EntityView::Committee(v) => vec![
                &v.top_individual_contributors,
                &v.top_committee_contributors,
                &v.transfer_recipients,
                &v.top_expenditure_recipients,
            ],
            EntityView::Candidate(v) => vec![&v.direct_senders, &v.direct_recipients],
        }
    }

    pub fn title(&self) -> &str {
        match self {
            EntityView::Individual(v) => &v.summary.name,
            EntityView::Committee(v) => &v.committee.name,
            EntityView::Candidate(v) => &v.summary.name,
        }
    }

    pub fn year(&self) -> &str {
        match self {
            EntityView::Individual(v) => &v.year,
            EntityView::Committee(v) => &v.year,
            EntityView::Candidate(v) => &v.year,
        }
    }

    pub fn year_links(&self) -> &[YearLink] {
        match self {
            EntityView::Individual(v) => &v.years,
            EntityView::Committee(v) => &v.years,
            EntityView::Candidate(v) => &v.years,
        }
    }
}

/// One role's raw inputs, borrowed from the primary snapshot.
struct RoleInput<'a> {
    role: CounterpartyRole,
    amounts: &'a [AmountRecord],
    counts: &'a TransactionCounts,
}

impl<'a> RoleInput<'a> {
    fn new(role: CounterpartyRole, amounts: &'a [AmountRecord], counts: &'a TransactionCounts) -> Self {
        Self {
            role,
            amounts,
            counts,
        }
    }
}

pub struct EntityViewComposer {
    service: Arc<dyn ViewService>,
    links: LinkBuilder,
    policy: MissingCountPolicy,
}

impl EntityViewComposer {
    pub fn new(service: Arc<dyn ViewService>, links: LinkBuilder, policy: MissingCountPolicy) -> Self {
        Self {
            service,
            links,
            policy,
        }
    }

    /// Compose the `year` snapshot of entity `id` in `bucket`.
    ///
    /// Only a failed primary fetch is an error; role failures are carried
    /// as `Section::Failed` inside the view.
    pub async fn compose(&self, year: &str, bucket: Bucket, id: &str) -> Result<EntityView, ComposeError> {
        let req = EntityRequest {
            object_id: id.to_string(),
            bucket,
            years: vec![year.to_string()],
        };

        let view = match bucket {
            Bucket::Individuals => {
                let resp = self.service.view_individual(req).await?;
                let indv = resp.individual;
                let [senders, recipients] = self
                    .resolve_roles(
                        year,
                        [
                            RoleInput::new(CounterpartyRole::Senders, &indv.senders_amt, &indv.senders_txs),
                            RoleInput::new(
                                CounterpartyRole::Recipients,
                                &indv.recipients_amt,
                                &indv.recipients_txs,
                            ),
                        ],
                    )
                    .await;
                EntityView::Individual(IndividualView {
                    year: year.to_string(),
                    years: self.links.year_links(&resp.years, resp.bucket, id),
                    summary: indv.summary,
                    senders,
                    recipients,
                })
            }
            Bucket::Committees => {
                let resp = self.service.view_committee(req).await?;
                let tx = resp.tx_data;
                let [indv, cmte, transfers, expenditures] = self
                    .resolve_roles(
                        year,
                        [
                            RoleInput::new(
                                CounterpartyRole::TopIndividualContributors,
                                &tx.top_indv_contributors_amt,
                                &tx.top_indv_contributors_txs,
                            ),
                            RoleInput::new(
                                CounterpartyRole::TopCommitteeContributors,
                                &tx.top_cmte_org_contributors_amt,
                                &tx.top_cmte_org_contributors_txs,
                            ),
                            RoleInput::new(
                                CounterpartyRole::TransferRecipients,
                                &tx.transfer_recs_amt,
                                &tx.transfer_recs_txs,
                            ),
                            RoleInput::new(
                                CounterpartyRole::TopExpenditureRecipients,
                                &tx.top_exp_recipients_amt,
                                &tx.top_exp_recipients_txs,
                            ),
                        ],
                    )
                    .await;
                EntityView::Committee(CommitteeView {
                    year: year.to_string(),
                    years: self.links.year_links(&resp.years, resp.bucket, id),
                    committee: resp.committee,
                    tx: tx.summary,
                    top_individual_contributors: indv,
                    top_committee_contributors: cmte,
                    transfer_recipients: transfers,
                    top_expenditure_recipients: expenditures,
                })
            }
            Bucket::Candidates => {
                let resp = self.service.view_candidate(req).await?;
                let cand = resp.candidate;
                let [direct_senders, direct_recipients] = self
                    .resolve_roles(
                        year,
                        [
                            RoleInput::new(
                                CounterpartyRole::DirectSenders,
                                &cand.direct_senders_amts,
                                &cand.direct_senders_txs,
                            ),
                            RoleInput::new(
                                CounterpartyRole::DirectRecipients,
                                &cand.direct_recipients_amts,
                                &cand.direct_recipients_txs,
                            ),
                        ],
                    )
                    .await;
                EntityView::Candidate(CandidateView {
                    year: year.to_string(),
                    years: self.links.year_links(&resp.years, resp.bucket, id),
                    summary: cand.summary,
                    direct_senders,
                    direct_recipients,
                })
            }
        };

        info!(year, bucket = %bucket, id, "entity view composed");
        Ok(view)
    }

    async fn resolve_roles<const N: usize>(
        &self,
        year: &str,
        inputs: [RoleInput<'_>; N],
    ) -> [RoleSection; N] {
        // Batch i carries the ids only role i names; batch N carries ids
        // named by more than one role.
        let mut first: HashMap<&str, usize> = HashMap::new();
        let mut shared: HashSet<&str> = HashSet::new();
        for (idx, input) in inputs.iter().enumerate() {
            for amount in input.amounts {
                let id = amount.id.as_str();
                match first.get(id).copied() {
                    None => {
                        first.insert(id, idx);
                    }
                    Some(owner) if owner != idx => {
                        shared.insert(id);
                    }
                    Some(_) => {}
                }
            }
        }
        let mut batches: Vec<Vec<&str>> = vec![Vec::new(); N + 1];
        for (&id, &owner) in &first {
            let slot = if shared.contains(id) { N } else { owner };
            batches[slot].push(id);
        }

        let resolver = LookupResolver::new(self.service.as_ref());
        let outcomes = join_all(batches.iter().map(|ids| resolver.resolve(ids))).await;

        let mut resolved: HashMap<String, ResolvedRecord> = HashMap::new();
        let mut failed: Vec<Option<String>> = Vec::with_capacity(N + 1);
        for outcome in outcomes {
            match outcome {
                Ok(records) => {
                    resolved.extend(records);
                    failed.push(None);
                }
                Err(err) => failed.push(Some(err.to_string())),
            }
        }
        let shared_failure = failed[N].as_deref();

        std::array::from_fn(|idx| {
            let input = &inputs[idx];
            let reads_shared = input
                .amounts
                .iter()
                .any(|amount| shared.contains(amount.id.as_str()));
            let lookup_failure = failed[idx]
                .as_deref()
                .or(shared_failure.filter(|_| reads_shared));
            RoleSection {
                role: input.role,
                heading: input.role.heading(),
                content: self.role_content(year, input, lookup_failure, &resolved),
            }
        })
    }

    fn role_content(
        &self,
        year: &str,
        input: &RoleInput<'_>,
        lookup_failure: Option<&str>,
        resolved: &HashMap<String, ResolvedRecord>,
    ) -> Section<Vec<CounterpartyRow>> {
        if let Some(reason) = lookup_failure {
            warn!(role = ?input.role, error = %reason, "counterparty lookup failed, hiding section");
            return Section::failed(reason);
        }

        match join(input.amounts, input.counts, resolved, self.policy) {
            Ok(entries) => Section::from_items(
                entries
                    .into_iter()
                    .map(|entry| self.row(year, entry))
                    .collect(),
            ),
            Err(err) => {
                warn!(role = ?input.role, error = %err, "counterparty join failed, hiding section");
                Section::failed(err)
            }
        }
    }

    fn row(&self, year: &str, entry: EnrichedCounterparty) -> CounterpartyRow {
        CounterpartyRow {
            line: entry.resolved.display_line(),
            href: self
                .links
                .view_object(year, entry.resolved.bucket, &entry.resolved.id),
            entry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakeService, record};
    use fecview_client::proto::{CandidateResponse, CommitteeResponse, IndividualResponse};
    use fecview_core::{Candidate, CommitteeTxData, Individual};
    use url::Url;

    fn composer(fake: FakeService, policy: MissingCountPolicy) -> (Arc<FakeService>, EntityViewComposer) {
        let fake = Arc::new(fake);
        let links = LinkBuilder::new(Url::parse("http://localhost:8081").unwrap()).unwrap();
        (fake.clone(), EntityViewComposer::new(fake, links, policy))
    }

    fn amounts(rows: &[(&str, f64)]) -> Vec<AmountRecord> {
        rows.iter()
            .map(|(id, total)| AmountRecord {
                id: id.to_string(),
                total: *total,
            })
            .collect()
    }

    fn counts(ids: &[&str]) -> TransactionCounts {
        ids.iter().map(|id| (id.to_string(), 2)).collect()
    }

    fn committee_fixture() -> FakeService {
        let tx = CommitteeTxData {
            top_indv_contributors_amt: amounts(&[("I1", 500.0), ("I2", 250.0)]),
            top_indv_contributors_txs: counts(&["I1", "I2"]),
            top_cmte_org_contributors_amt: amounts(&[("C2", 900.0)]),
            top_cmte_org_contributors_txs: counts(&["C2"]),
            transfer_recs_amt: amounts(&[("C9", 100.0)]),
            transfer_recs_txs: counts(&["C9"]),
            ..Default::default()
        };
        FakeService::new()
            .with_committee(CommitteeResponse {
                committee: Committee {
                    id: "C1".into(),
                    name: "ALPHA PAC".into(),
                    ..Default::default()
                },
                tx_data: tx,
                bucket: Bucket::Committees,
                years: vec!["2020".into(), "2018".into()],
            })
            .with_record(record("I1", Bucket::Individuals, "DOE, JANE"))
            .with_record(record("I2", Bucket::Individuals, "ROE, RICK"))
            .with_record(record("C2", Bucket::Committees, "BETA PAC"))
            .with_record(record("C9", Bucket::Committees, "GAMMA PAC"))
    }

    fn ids(section: &RoleSection) -> Vec<String> {
        section
            .content
            .ready()
            .map(|rows| rows.iter().map(|r| r.entry.resolved.id.clone()).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn failed_role_only_hides_its_own_section() {
        let (_, composer) = composer(committee_fixture().poison_lookup("C9"), MissingCountPolicy::Fail);

        let view = composer.compose("2020", Bucket::Committees, "C1").await.unwrap();

        let EntityView::Committee(v) = &view else {
            panic!("expected committee view");
        };
        assert_eq!(ids(&v.top_individual_contributors), ["I1", "I2"]);
        assert_eq!(ids(&v.top_committee_contributors), ["C2"]);
        assert!(v.transfer_recipients.content.is_failed());
        assert_eq!(v.top_expenditure_recipients.content, Section::Empty);

        let failed: Vec<CounterpartyRole> = view
            .sections()
            .iter()
            .filter(|s| s.content.is_failed())
            .map(|s| s.role)
            .collect();
        assert_eq!(failed, [CounterpartyRole::TransferRecipients]);
    }

    #[tokio::test]
    async fn primary_fetch_failure_is_fatal() {
        let (_, composer) = composer(committee_fixture().failing("view_committee"), MissingCountPolicy::Fail);
        let err = composer.compose("2020", Bucket::Committees, "C1").await.unwrap_err();
        assert!(matches!(err, ComposeError::Service(_)));
    }

    #[tokio::test]
    async fn shared_ids_are_resolved_once() {
        let indv = Individual {
            summary: IndividualSummary {
                id: "P1".into(),
                name: "DOE, JOHN".into(),
                ..Default::default()
            },
            senders_amt: amounts(&[("C1", 50.0), ("C2", 40.0)]),
            senders_txs: counts(&["C1", "C2"]),
            recipients_amt: amounts(&[("C2", 700.0), ("C3", 300.0)]),
            recipients_txs: counts(&["C2", "C3"]),
        };
        let fake = FakeService::new()
            .with_individual(IndividualResponse {
                individual: indv,
                bucket: Bucket::Individuals,
                years: vec!["2020".into()],
            })
            .with_record(record("C1", Bucket::Committees, "ONE PAC"))
            .with_record(record("C2", Bucket::Committees, "TWO PAC"))
            .with_record(record("C3", Bucket::Committees, "THREE PAC"));
        let (fake, composer) = composer(fake, MissingCountPolicy::Fail);

        let view = composer.compose("2020", Bucket::Individuals, "P1").await.unwrap();

        let mut batches = fake.lookups();
        batches.sort();
        assert_eq!(
            batches,
            vec![
                vec!["C1".to_string()],
                vec!["C2".to_string()],
                vec!["C3".to_string()]
            ]
        );
        let EntityView::Individual(v) = &view else {
            panic!("expected individual view");
        };
        assert_eq!(ids(&v.senders), ["C1", "C2"]);
        assert_eq!(ids(&v.recipients), ["C2", "C3"]);
        assert_eq!(view.title(), "DOE, JOHN");
        assert_eq!(view.year_links().len(), 1);
    }

    fn sender_recipient_fixture(senders: &[&str], recipients: &[&str]) -> FakeService {
        let rows = |ids: &[&str]| -> Vec<AmountRecord> {
            ids.iter()
                .enumerate()
                .map(|(i, id)| AmountRecord {
                    id: id.to_string(),
                    total: 100.0 - i as f64,
                })
                .collect()
        };
        let indv = Individual {
            summary: IndividualSummary {
                id: "P1".into(),
                name: "DOE, JOHN".into(),
                ..Default::default()
            },
            senders_amt: rows(senders),
            senders_txs: counts(senders),
            recipients_amt: rows(recipients),
            recipients_txs: counts(recipients),
        };
        let mut fake = FakeService::new().with_individual(IndividualResponse {
            individual: indv,
            bucket: Bucket::Individuals,
            years: vec!["2020".into()],
        });
        for id in senders.iter().chain(recipients) {
            fake = fake.with_record(record(id, Bucket::Committees, id));
        }
        fake
    }

    fn failed_roles(view: &EntityView) -> Vec<CounterpartyRole> {
        view.sections()
            .iter()
            .filter(|s| s.content.is_failed())
            .map(|s| s.role)
            .collect()
    }

    #[tokio::test]
    async fn own_batch_failure_stays_in_its_role() {
        let fake = sender_recipient_fixture(&["BAD", "C2"], &["C2", "C3"]).poison_lookup("BAD");
        let (_, composer) = composer(fake, MissingCountPolicy::Fail);

        let view = composer.compose("2020", Bucket::Individuals, "P1").await.unwrap();

        assert_eq!(failed_roles(&view), [CounterpartyRole::Senders]);
        let EntityView::Individual(v) = &view else {
            panic!("expected individual view");
        };
        assert_eq!(ids(&v.recipients), ["C2", "C3"]);
    }

    #[tokio::test]
    async fn shared_batch_failure_hits_every_reader() {
        let fake = sender_recipient_fixture(&["C1", "C2"], &["C2", "C3"]).poison_lookup("C2");
        let (_, composer) = composer(fake, MissingCountPolicy::Fail);

        let view = composer.compose("2020", Bucket::Individuals, "P1").await.unwrap();

        assert_eq!(
            failed_roles(&view),
            [CounterpartyRole::Senders, CounterpartyRole::Recipients]
        );
    }

    #[tokio::test]
    async fn missing_count_fails_only_that_section() {
        let cand = Candidate {
            summary: CandidateSummary {
                id: "P9".into(),
                name: "SMITH, ANN".into(),
                ..Default::default()
            },
            direct_senders_amts: amounts(&[("I1", 100.0), ("I2", 80.0)]),
            direct_senders_txs: counts(&["I1"]),
            direct_recipients_amts: amounts(&[("C2", 60.0)]),
            direct_recipients_txs: counts(&["C2"]),
        };
        let fake = || {
            FakeService::new()
                .with_candidate(CandidateResponse {
                    candidate: cand.clone(),
                    bucket: Bucket::Candidates,
                    years: vec!["2020".into()],
                })
                .with_record(record("I1", Bucket::Individuals, "A"))
                .with_record(record("I2", Bucket::Individuals, "B"))
                .with_record(record("C2", Bucket::Committees, "C"))
        };

        let (_, strict) = composer(fake(), MissingCountPolicy::Fail);
        let EntityView::Candidate(v) = strict.compose("2020", Bucket::Candidates, "P9").await.unwrap() else {
            panic!("expected candidate view");
        };
        assert!(v.direct_senders.content.is_failed());
        assert_eq!(ids(&v.direct_recipients), ["C2"]);

        let (_, lenient) = composer(fake(), MissingCountPolicy::Drop);
        let EntityView::Candidate(v) = lenient.compose("2020", Bucket::Candidates, "P9").await.unwrap() else {
            panic!("expected candidate view");
        };
        assert_eq!(ids(&v.direct_senders), ["I1"]);
    }

    #[tokio::test]
    async fn rows_link_to_the_counterparty_bucket() {
        let mut jane = record("I1", Bucket::Individuals, "DOE, JANE");
        jane.employer = Some("ACME".into());
        let fake = committee_fixture().with_record(jane);
        let (_, composer) = composer(fake, MissingCountPolicy::Fail);

        let view = composer.compose("2018", Bucket::Committees, "C1").await.unwrap();

        let EntityView::Committee(v) = &view else {
            panic!("expected committee view");
        };
        let rows = v.top_individual_contributors.content.ready().unwrap();
        assert_eq!(rows[0].line, "DOE, JANE - ACME - SPRINGFIELD, IL");
        assert_eq!(
            rows[0].href,
            "http://localhost:8081/view-object/?year=2018&bucket=individuals&id=I1"
        );
        assert_eq!(rows[0].entry.average, 250.0);
        let cmte_rows = v.top_committee_contributors.content.ready().unwrap();
        assert!(cmte_rows[0].href.contains("bucket=cmte_tx_data&id=C2"));
        assert_eq!(
            view.year_links()[1].href,
            "http://localhost:8081/view-object/?year=2018&bucket=cmte_tx_data&id=C1"
        );
    }

    #[tokio::test]
    async fn unresolved_everything_is_empty_not_failed() {
        let fake = FakeService::new().with_committee(CommitteeResponse {
            committee: Committee {
                id: "C1".into(),
                name: "ALPHA PAC".into(),
                ..Default::default()
            },
            tx_data: CommitteeTxData {
                transfer_recs_amt: amounts(&[("GHOST", 10.0)]),
                ..Default::default()
            },
            bucket: Bucket::Committees,
            years: Vec::new(),
        });
        let (_, composer) = composer(fake, MissingCountPolicy::Fail);

        let view = composer.compose("2020", Bucket::Committees, "C1").await.unwrap();

        assert!(view.sections().iter().all(|s| s.content == Section::Empty));
    }
}
