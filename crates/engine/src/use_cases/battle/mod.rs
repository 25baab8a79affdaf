//! Battle use case.
//!
//! Loads both combatants, validates preconditions, runs winner selection and
//! persists the outcome (update winner, update-or-delete loser) as one
//! transaction.

mod winner;

pub use winner::{select_winner, BattleOutcome};

use std::sync::Arc;

use pokearena_domain::{Pokemon, PokemonId};

use crate::infrastructure::ports::{BattleTx, RandomPort, RepoError, UnitOfWork};

/// Post-battle state of both combatants.
///
/// The loser is reported at its terminal level even when that level is 0 and
/// the underlying record has been deleted.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BattleResult {
    pub winner: Pokemon,
    pub loser: Pokemon,
}

#[derive(Debug, thiserror::Error)]
pub enum BattleError {
    #[error("cannot battle the same pokemon")]
    SameCombatant,
    #[error("pokemon not found: {0}")]
    NotFound(PokemonId),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Battle orchestration use case.
pub struct Battle {
    uow: Arc<dyn UnitOfWork>,
    random: Arc<dyn RandomPort>,
}

impl Battle {
    pub fn new(uow: Arc<dyn UnitOfWork>, random: Arc<dyn RandomPort>) -> Self {
        Self { uow, random }
    }

    /// Execute one battle between two distinct Pokemon.
    ///
    /// Every failure after `begin` rolls the transaction back and propagates;
    /// there are no retries.
    pub async fn execute(
        &self,
        attacker_id: PokemonId,
        defender_id: PokemonId,
    ) -> Result<BattleResult, BattleError> {
        // 1. Same-id guard, before any storage access.
        if attacker_id == defender_id {
            return Err(BattleError::SameCombatant);
        }

        // 2. Loads and mutations share one transaction so concurrent battles
        //    see either all of this battle's writes or none of them.
        let mut tx = self.uow.begin().await?;
        match self.run(tx.as_mut(), attacker_id, defender_id).await {
            Ok(result) => {
                tx.commit().await?;
                Ok(result)
            }
            Err(e) => {
                // Best-effort rollback; the original error is what the caller
                // needs to see.
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "rollback failed after battle error");
                }
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        tx: &mut dyn BattleTx,
        attacker_id: PokemonId,
        defender_id: PokemonId,
    ) -> Result<BattleResult, BattleError> {
        // 3. Both combatants must exist.
        let attacker = tx
            .get(attacker_id)
            .await?
            .ok_or(BattleError::NotFound(attacker_id))?;
        let defender = tx
            .get(defender_id)
            .await?
            .ok_or(BattleError::NotFound(defender_id))?;

        // 4. Weighted selection on a single uniform draw.
        let outcome = select_winner(attacker, defender, self.random.next_unit());

        // 5. Apply the +/-1 deltas. Loaded records always have level >= 1
        //    (a level-0 loser is deleted, never persisted), so the
        //    subtraction cannot underflow.
        let new_winner_level = outcome.winner.level + 1;
        let new_loser_level = outcome.loser.level.saturating_sub(1);

        tx.update_level(outcome.winner.id, new_winner_level).await?;
        if new_loser_level == 0 {
            tx.delete(outcome.loser.id).await?;
        } else {
            tx.update_level(outcome.loser.id, new_loser_level).await?;
        }

        Ok(BattleResult {
            winner: Pokemon {
                level: new_winner_level,
                ..outcome.winner
            },
            loser: Pokemon {
                level: new_loser_level,
                ..outcome.loser
            },
        })
    }
}
