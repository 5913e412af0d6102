//! Economy application: settles the tick's bounties and leaks.

use csdefense_core::events::GameEvent;

use crate::economy::{Economy, LedgerEntry};

/// Apply and drain the ledger in recorded order.
pub fn run(economy: &mut Economy, ledger: &mut Vec<LedgerEntry>, events: &mut Vec<GameEvent>) {
    let was_depleted = economy.is_depleted();

    for entry in ledger.drain(..) {
        match entry {
            LedgerEntry::Bounty {
                enemy,
                kind,
                tower,
                reward,
            } => {
                economy.money += i64::from(reward);
                tracing::debug!(%enemy, ?kind, %tower, reward, money = economy.money, "enemy killed");
                events.push(GameEvent::EnemyKilled {
                    enemy,
                    kind,
                    tower,
                    reward,
                });
            }
            LedgerEntry::Leak {
                enemy,
                kind,
                damage,
            } => {
                economy.lives -= i64::from(damage);
                tracing::debug!(%enemy, ?kind, damage, lives = economy.lives, "enemy leaked");
                events.push(GameEvent::EnemyLeaked {
                    enemy,
                    kind,
                    damage,
                });
            }
        }
    }

    if !was_depleted && economy.is_depleted() {
        tracing::info!(lives = economy.lives, "lives depleted");
        events.push(GameEvent::LivesDepleted {
            lives: economy.lives,
        });
    }
}
