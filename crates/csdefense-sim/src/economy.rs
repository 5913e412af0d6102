//! Economy ledger and placement transactions.
//!
//! Combat systems never touch money or lives directly. They record
//! [`LedgerEntry`] values which the ledger system applies in one place.

use serde::{Deserialize, Serialize};

use csdefense_core::config::GameConfig;
use csdefense_core::enums::{EnemyKind, TowerKind};
use csdefense_core::error::CommandError;
use csdefense_core::types::{EnemyId, GridCell, TowerId};
use csdefense_map::Grid;

use crate::pool::EntityPool;
use crate::world_setup;

/// Money and lives.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Economy {
    pub money: i64,
    /// Not clamped; may go below zero.
    pub lives: i64,
}

impl Economy {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            money: config.economy.starting_money,
            lives: config.economy.starting_lives,
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.lives <= 0
    }

    fn ensure_affordable(&self, cost: u32) -> Result<(), CommandError> {
        if self.money < i64::from(cost) {
            return Err(CommandError::InsufficientFunds {
                cost,
                available: self.money,
            });
        }
        Ok(())
    }
}

/// A pending change to the economy produced during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEntry {
    /// An enemy was killed by a tower's projectile.
    Bounty {
        enemy: EnemyId,
        kind: EnemyKind,
        tower: TowerId,
        reward: u32,
    },
    /// An enemy reached the end of the path.
    Leak {
        enemy: EnemyId,
        kind: EnemyKind,
        damage: u32,
    },
}

/// Run every placement check without changing anything.
///
/// Checks funds first, then the cell.
pub fn can_place(
    grid: &Grid,
    economy: &Economy,
    config: &GameConfig,
    kind: TowerKind,
    cell: GridCell,
) -> Result<(), CommandError> {
    economy.ensure_affordable(config.towers.get(kind).cost)?;
    grid.check_buildable(&cell)
}

/// Buy a tower and place it centered in `cell`.
pub fn place_tower(
    pool: &mut EntityPool,
    grid: &mut Grid,
    economy: &mut Economy,
    config: &GameConfig,
    kind: TowerKind,
    cell: GridCell,
) -> Result<TowerId, CommandError> {
    let cost = config.towers.get(kind).cost;
    economy.ensure_affordable(cost)?;
    grid.occupy(&cell)?;
    economy.money -= i64::from(cost);
    Ok(world_setup::spawn_tower(pool, config, kind, cell))
}

/// Sell a tower, free its cell and refund part of the price paid.
///
/// Returns the refund.
pub fn sell_tower(
    pool: &mut EntityPool,
    grid: &mut Grid,
    economy: &mut Economy,
    config: &GameConfig,
    tower: TowerId,
) -> Result<u32, CommandError> {
    let removed = pool
        .remove_tower(tower)
        .ok_or(CommandError::NotFound { tower })?;
    grid.vacate(&removed.cell);
    let refund = config.economy.refund_for(removed.cost);
    economy.money += i64::from(refund);
    Ok(refund)
}
