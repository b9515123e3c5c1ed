use std::sync::Arc;
use storage::DocumentStore;
use storage::dto::competition::NewCompetition;
use storage::dto::user::Identity;
use storage::dto::weight::WeightRequest;
use storage::models::{ApprovalState, Competition, User};
use storage::repository::competition::CompetitionRepository;
use storage::repository::user::UserRepository;
use storage::repository::weight::WeightRepository;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::context::StoreContext;
use crate::error::{Result, TrackerError};
use crate::events::StoreEvent;
use crate::roster::TeamRoster;

/// Records written by a single competition submission
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub record: Competition,
    /// The swapped record of a tie, when its write succeeded
    pub mirror: Option<Competition>,
}

/// Runs every mutating operation against the remote store and, once the
/// remote call has succeeded, applies the matching change to the local caches.
///
/// Loads, adds, updates and publishing return their failure to the caller and
/// leave the caches untouched. Removals are best-effort: their failures go to
/// the shared error slot and are not returned.
///
/// There is no version check on remote writes. A replace that completes
/// after a later removal of the same record recreates the remote document;
/// the ledger only changes records it still holds, so it is left alone.
pub struct SyncEngine {
    store: Arc<dyn DocumentStore>,
    context: Arc<StoreContext>,
    roster: TeamRoster,
}

impl SyncEngine {
    pub fn new(store: Arc<dyn DocumentStore>, context: Arc<StoreContext>, roster: TeamRoster) -> Self {
        Self {
            store,
            context,
            roster,
        }
    }

    pub fn context(&self) -> &Arc<StoreContext> {
        &self.context
    }

    pub fn roster(&self) -> &TeamRoster {
        &self.roster
    }

    fn competitions(&self) -> CompetitionRepository<'_> {
        CompetitionRepository::new(self.store.as_ref())
    }

    fn weights(&self) -> WeightRepository<'_> {
        WeightRepository::new(self.store.as_ref())
    }

    // Weights

    /// Replace the weight cache with the remote collection
    pub async fn load_weights(&self) -> Result<usize> {
        info!("Loading weights");
        let weights = self
            .weights()
            .list()
            .await
            .map_err(TrackerError::RemoteRead)?;

        let count = weights.len();
        self.context.weights().replace_all(weights);
        info!("Loaded {} weights", count);
        self.context.emit(StoreEvent::WeightsLoaded { count });

        Ok(count)
    }

    /// Create or overwrite the weight document named `request.name`
    pub async fn add_weight(&self, request: WeightRequest) -> Result<()> {
        request.validate()?;

        self.weights()
            .put(&request.name, request.value)
            .await
            .map_err(TrackerError::RemoteWrite)?;

        debug!("Set weight {} = {}", request.name, request.value);
        self.context.weights().insert(&request.name, request.value);
        self.context.emit(StoreEvent::WeightSet {
            name: request.name,
            value: request.value,
        });

        Ok(())
    }

    /// Change the value of an existing weight
    pub async fn update_weight(&self, name: &str, value: f64) -> Result<()> {
        WeightRequest::new(name, value).validate()?;

        self.weights()
            .update(name, value)
            .await
            .map_err(TrackerError::RemoteWrite)?;

        debug!("Updated weight {} = {}", name, value);
        self.context.weights().insert(name, value);
        self.context.emit(StoreEvent::WeightSet {
            name: name.to_string(),
            value,
        });

        Ok(())
    }

    /// Delete a weight. Failures are recorded in the error slot.
    pub async fn remove_weight(&self, name: &str) {
        match self.weights().delete(name).await {
            Ok(()) => {
                debug!("Removed weight {}", name);
                self.context.weights().remove(name);
                self.context.emit(StoreEvent::WeightRemoved {
                    name: name.to_string(),
                });
            }
            Err(e) => {
                warn!("Error removing weight {}", name);
                self.context.record_error(TrackerError::RemoteDelete(e));
            }
        }
    }

    /// Weight names, which double as the list of competing teams
    pub fn competition_names(&self) -> Vec<String> {
        self.context.weights().names()
    }

    // Competitions

    /// Append every remote competition to the ledger.
    ///
    /// Calling this twice appends the collection twice.
    pub async fn load_competitions(&self) -> Result<usize> {
        info!("Loading competitions");
        let competitions = self
            .competitions()
            .list()
            .await
            .map_err(TrackerError::RemoteRead)?;

        let count = competitions.len();
        self.context.ledger().extend(competitions);
        info!("Loaded {} competitions", count);
        self.context.emit(StoreEvent::CompetitionsLoaded { count });

        Ok(count)
    }

    /// Submit a match result.
    ///
    /// A tie is written as two independent records with the teams swapped.
    /// Both writes are in flight at the same time and each record enters the
    /// ledger only if its own write succeeded; a failed mirror write is
    /// recorded in the error slot, a failed original write is returned.
    pub async fn add_competition(&self, request: NewCompetition) -> Result<Submission> {
        request.validate()?;
        self.roster.check(&request.winner)?;
        self.roster.check(&request.loser)?;

        let competition = Competition {
            id: String::new(),
            winner: request.winner,
            loser: request.loser,
            tied: request.tied,
            approval_state: ApprovalState::Submitted,
            submitted_by: self.context.session().submitted_by(),
        };

        if !competition.tied {
            let record = self.insert_competition(competition).await?;
            return Ok(Submission {
                record,
                mirror: None,
            });
        }

        let mirror = competition.mirrored();
        let (mirror_result, record_result) = tokio::join!(
            self.insert_competition(mirror),
            self.insert_competition(competition)
        );

        let mirror = match mirror_result {
            Ok(mirror) => Some(mirror),
            Err(e) => {
                warn!("Mirror record of a tie was not written");
                self.context.record_error(e);
                None
            }
        };
        let record = record_result?;

        Ok(Submission { record, mirror })
    }

    async fn insert_competition(&self, competition: Competition) -> Result<Competition> {
        let id = self
            .competitions()
            .create(&competition)
            .await
            .map_err(TrackerError::RemoteWrite)?;

        let competition = competition.with_id(id);
        self.context.ledger().prepend(competition.clone());
        self.context.emit(StoreEvent::CompetitionAdded {
            id: competition.id.clone(),
        });

        Ok(competition)
    }

    /// Overwrite every field of a competition
    pub async fn replace_competition(&self, competition: Competition) -> Result<()> {
        self.roster.check(&competition.winner)?;
        self.roster.check(&competition.loser)?;

        self.competitions()
            .replace(&competition)
            .await
            .map_err(TrackerError::RemoteWrite)?;

        let id = competition.id.clone();
        if self.context.ledger().replace(competition) {
            self.context.emit(StoreEvent::CompetitionReplaced { id });
        } else {
            debug!("Replaced competition {} is not cached locally", id);
        }

        Ok(())
    }

    /// Move one competition to `state`.
    ///
    /// No ordering between states is enforced. The remote write happens even
    /// when the record is not in the local ledger.
    pub async fn update_approval_state(&self, id: &str, state: ApprovalState) -> Result<()> {
        self.competitions()
            .set_approval_state(id, state)
            .await
            .map_err(TrackerError::RemoteWrite)?;

        if self.context.ledger().set_approval_state(id, state) {
            debug!("Competition {} is now {}", id, state);
            self.context.emit(StoreEvent::ApprovalStateChanged {
                id: id.to_string(),
                state,
            });
        } else {
            debug!("Competition {} is not cached locally", id);
        }

        Ok(())
    }

    /// Delete a competition. Failures are recorded in the error slot.
    pub async fn remove_competition(&self, id: &str) {
        match self.competitions().delete(id).await {
            Ok(()) => {
                if self.context.ledger().remove(id).is_some() {
                    debug!("Removed competition {}", id);
                    self.context
                        .emit(StoreEvent::CompetitionRemoved { id: id.to_string() });
                } else {
                    debug!("Removed competition {} is not cached locally", id);
                }
            }
            Err(e) => {
                warn!("Error removing competition {}", id);
                self.context.record_error(TrackerError::RemoteDelete(e));
            }
        }
    }

    /// Publish every approved competition in one atomic batch.
    ///
    /// Only records that are exactly `approved` are selected. The ledger is
    /// updated after the batch commits; a failed commit changes nothing.
    /// Returns the published ids.
    pub async fn publish_all(&self) -> Result<Vec<String>> {
        let ids = self.context.ledger().ids_in_state(ApprovalState::Approved);
        info!("Publishing {} approved competitions", ids.len());

        self.competitions()
            .publish(&ids)
            .await
            .map_err(TrackerError::RemoteWrite)?;

        let applied = self.context.ledger().mark_published(&ids);
        if applied < ids.len() {
            warn!(
                "{} published competitions left the ledger during the batch",
                ids.len() - applied
            );
        }
        self.context.emit(StoreEvent::Published { ids: ids.clone() });

        Ok(ids)
    }

    // Session

    /// Attach the stored profile of `identity` to the session
    pub async fn sign_in(&self, identity: Identity) -> Result<User> {
        identity.validate()?;

        let profile = match UserRepository::new(self.store.as_ref())
            .find_by_email(&identity.email)
            .await
        {
            Ok(profile) => profile,
            Err(e) if e.is_not_found() => {
                self.context
                    .record_error(TrackerError::UserNotFound(identity.email.clone()));
                return Err(TrackerError::UserNotFound(identity.email));
            }
            Err(e) => return Err(TrackerError::RemoteRead(e)),
        };

        let user = self.context.session().establish(identity, profile)?;
        info!("Signed in {} as {}", user.email, user.role);
        self.context.emit(StoreEvent::SessionChanged {
            email: user.email.clone(),
            role: user.role,
        });

        Ok(user)
    }

    pub fn sign_out(&self) {
        let user = self.context.session().current_user();
        self.context.session().reset();
        info!("Signed out {}", user.email);

        let guest = self.context.session().current_user();
        self.context.emit(StoreEvent::SessionChanged {
            email: guest.email,
            role: guest.role,
        });
    }
}
