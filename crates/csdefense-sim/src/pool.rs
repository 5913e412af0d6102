//! Entity pool: hecs storage plus per-kind id indexes.
//!
//! The indexes are ordered maps, so iterating one yields entities in
//! allocation order. Enemy ids are allocated at spawn, which makes
//! "pool order" the same as spawn order.

use std::collections::BTreeMap;

use hecs::{Entity, World};

use csdefense_core::components::*;
use csdefense_core::types::{EnemyId, Position, ProjectileId, TowerId};

#[derive(Default)]
pub struct EntityPool {
    world: World,
    enemies: BTreeMap<EnemyId, Entity>,
    towers: BTreeMap<TowerId, Entity>,
    projectiles: BTreeMap<ProjectileId, Entity>,
    next_enemy_id: u32,
    next_tower_id: u32,
    next_projectile_id: u32,
}

impl EntityPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    // --- Id allocation ---

    pub fn next_enemy_id(&mut self) -> EnemyId {
        let id = EnemyId(self.next_enemy_id);
        self.next_enemy_id += 1;
        id
    }

    pub fn next_tower_id(&mut self) -> TowerId {
        let id = TowerId(self.next_tower_id);
        self.next_tower_id += 1;
        id
    }

    pub fn next_projectile_id(&mut self) -> ProjectileId {
        let id = ProjectileId(self.next_projectile_id);
        self.next_projectile_id += 1;
        id
    }

    // --- Insertion ---

    pub fn add_enemy(&mut self, enemy: Enemy, progress: PathProgress, position: Position) -> Entity {
        let id = enemy.id;
        let entity = self.world.spawn((EnemyMarker, enemy, progress, position));
        self.enemies.insert(id, entity);
        entity
    }

    pub fn add_tower(&mut self, tower: Tower, weapon: Weapon, position: Position) -> Entity {
        let id = tower.id;
        let entity = self
            .world
            .spawn((TowerMarker, tower, weapon, TowerStats::default(), position));
        self.towers.insert(id, entity);
        entity
    }

    pub fn add_projectile(&mut self, projectile: Projectile) -> Entity {
        let id = projectile.id;
        let position = projectile.origin;
        let entity = self.world.spawn((ProjectileMarker, projectile, position));
        self.projectiles.insert(id, entity);
        entity
    }

    // --- Lookup ---

    pub fn enemy(&self, id: EnemyId) -> Option<Entity> {
        self.enemies.get(&id).copied()
    }

    pub fn tower(&self, id: TowerId) -> Option<Entity> {
        self.towers.get(&id).copied()
    }

    /// Enemy entities in pool order.
    pub fn enemy_entities(&self) -> impl Iterator<Item = (EnemyId, Entity)> + '_ {
        self.enemies.iter().map(|(&id, &e)| (id, e))
    }

    /// Tower entities in placement order.
    pub fn tower_entities(&self) -> impl Iterator<Item = (TowerId, Entity)> + '_ {
        self.towers.iter().map(|(&id, &e)| (id, e))
    }

    /// Projectile entities in launch order.
    pub fn projectile_entities(&self) -> impl Iterator<Item = (ProjectileId, Entity)> + '_ {
        self.projectiles.iter().map(|(&id, &e)| (id, e))
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn tower_count(&self) -> usize {
        self.towers.len()
    }

    pub fn projectile_count(&self) -> usize {
        self.projectiles.len()
    }

    /// Enemies not yet marked dead.
    pub fn live_enemy_count(&self) -> usize {
        self.world
            .query::<(&EnemyMarker, &Enemy)>()
            .iter()
            .filter(|(_, (_, enemy))| enemy.alive)
            .count()
    }

    /// Whether `id` refers to an enemy that is still alive.
    pub fn is_enemy_alive(&self, id: EnemyId) -> bool {
        self.enemy(id)
            .and_then(|e| self.world.get::<&Enemy>(e).ok().map(|enemy| enemy.alive))
            .unwrap_or(false)
    }

    // --- Removal ---

    /// Remove a tower immediately, returning its final state.
    pub fn remove_tower(&mut self, id: TowerId) -> Option<Tower> {
        let entity = self.towers.remove(&id)?;
        let tower = self.world.get::<&Tower>(entity).ok().map(|t| (*t).clone());
        let _ = self.world.despawn(entity);
        tower
    }

    /// Despawn every enemy marked dead and every spent projectile.
    ///
    /// Runs between phases, never during iteration. Returns the number of
    /// entities removed.
    pub fn compact(&mut self, despawn_buffer: &mut Vec<Entity>) -> usize {
        despawn_buffer.clear();

        for (entity, enemy) in self.world.query_mut::<&Enemy>() {
            if !enemy.alive {
                despawn_buffer.push(entity);
            }
        }
        for (entity, projectile) in self.world.query_mut::<&Projectile>() {
            if !projectile.live {
                despawn_buffer.push(entity);
            }
        }

        if despawn_buffer.is_empty() {
            return 0;
        }

        let removed = despawn_buffer.len();
        for &entity in despawn_buffer.iter() {
            let _ = self.world.despawn(entity);
        }
        let world = &self.world;
        self.enemies.retain(|_, e| world.contains(*e));
        self.projectiles.retain(|_, e| world.contains(*e));
        despawn_buffer.clear();
        removed
    }
}
