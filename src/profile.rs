//! Persistent player resources
//!
//! Everything here survives from wave to wave within a run. The arena reads
//! it when a wave starts and writes coins, health and the weapon loadout back
//! only at wave boundaries. Shop screens mutate it between waves.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::catalog::{self, FISTS};
use crate::error::{Error, Result};

/// Maximum number of weapons the player can carry
pub const MAX_WEAPONS: usize = 2;
/// Durability of a freshly bought weapon
pub const MAX_DURABILITY: u8 = 100;
/// Cap for every TAC-BAR stat
pub const TAC_MAX_LEVEL: u32 = 10;

pub const STARTING_COINS: u64 = 500;
pub const STARTING_HEALTH: f32 = 300.0;
pub const STARTING_WEAPON: &str = "Katana";

/// A carried weapon and how much use it has left
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldWeapon {
    pub name: String,
    /// 0..=100; unusable at 0
    pub durability: u8,
}

impl HeldWeapon {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            durability: MAX_DURABILITY,
        }
    }

    pub fn is_broken(&self) -> bool {
        self.durability == 0
    }
}

/// Result of using the active weapon once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wear {
    /// Durability went down but the weapon still works
    Worn,
    /// Durability hit 0; the active slot fell back to fists
    Broke,
    /// Nothing to wear (fists, or wear suppressed)
    None,
}

/// Weapons held (max 2) plus which one is in hand.
///
/// `current` is always either [`FISTS`] or the name of a held weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    weapons: Vec<HeldWeapon>,
    current: String,
    secondary: Option<String>,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            weapons: vec![HeldWeapon::new(STARTING_WEAPON)],
            current: STARTING_WEAPON.to_string(),
            secondary: None,
        }
    }
}

impl Loadout {
    /// Empty hands
    pub fn fists() -> Self {
        Self {
            weapons: Vec::new(),
            current: FISTS.to_string(),
            secondary: None,
        }
    }

    /// Build from an explicit weapon list; the first becomes current
    pub fn with_weapons(weapons: Vec<HeldWeapon>) -> Self {
        let mut loadout = Self::fists();
        loadout.weapons = weapons;
        loadout.weapons.truncate(MAX_WEAPONS);
        loadout.sync_slots();
        loadout
    }

    pub fn weapons(&self) -> &[HeldWeapon] {
        &self.weapons
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn secondary(&self) -> Option<&str> {
        self.secondary.as_deref()
    }

    pub fn holds(&self, name: &str) -> bool {
        self.weapons.iter().any(|w| w.name == name)
    }

    /// The held weapon in hand, if any (None with fists)
    pub fn active(&self) -> Option<&HeldWeapon> {
        self.weapons.iter().find(|w| w.name == self.current)
    }

    fn active_mut(&mut self) -> Option<&mut HeldWeapon> {
        let current = &self.current;
        self.weapons.iter_mut().find(|w| &w.name == current)
    }

    /// Whether the weapon in hand can fire right now
    pub fn can_shoot(&self) -> bool {
        self.active()
            .is_some_and(|w| !w.is_broken() && catalog::is_ranged(&w.name))
    }

    /// Whether the weapon in hand is a working melee weapon (fists excluded)
    pub fn holds_working_melee(&self) -> bool {
        self.active()
            .is_some_and(|w| !w.is_broken() && !catalog::is_ranged(&w.name))
    }

    /// Whether the weapon in hand is held but worn out
    pub fn active_is_broken(&self) -> bool {
        self.active().is_some_and(HeldWeapon::is_broken)
    }

    /// Put the weapons away
    pub fn switch_to_fists(&mut self) {
        self.current = FISTS.to_string();
    }

    /// Spend one point of durability on the weapon in hand.
    ///
    /// Durability clamps at 0 and the hand falls back to fists on the use
    /// that breaks it.
    pub fn wear_active(&mut self) -> Wear {
        let Some(weapon) = self.active_mut() else {
            return Wear::None;
        };
        if weapon.is_broken() {
            return Wear::None;
        }
        weapon.durability = weapon.durability.saturating_sub(1);
        if weapon.is_broken() {
            log::debug!("{} broke", weapon.name);
            self.switch_to_fists();
            Wear::Broke
        } else {
            Wear::Worn
        }
    }

    /// Swap primary and secondary when two weapons are held
    pub fn swap(&mut self) -> bool {
        if self.weapons.len() != MAX_WEAPONS {
            return false;
        }
        self.weapons.swap(0, 1);
        self.sync_slots();
        true
    }

    /// Throw away the weapon in hand (fists cannot be dropped)
    pub fn drop_current(&mut self) -> Option<HeldWeapon> {
        if self.current == FISTS {
            return None;
        }
        let idx = self.weapons.iter().position(|w| w.name == self.current)?;
        let dropped = self.weapons.remove(idx);
        self.sync_slots();
        Some(dropped)
    }

    /// Add a new weapon: fills the free slot, otherwise replaces slot two
    pub fn add(&mut self, name: &str) {
        let weapon = HeldWeapon::new(name);
        if self.weapons.len() < MAX_WEAPONS {
            self.weapons.push(weapon);
        } else {
            self.weapons[MAX_WEAPONS - 1] = weapon;
        }
        self.sync_slots();
    }

    fn sync_slots(&mut self) {
        self.current = self
            .weapons
            .first()
            .map(|w| w.name.clone())
            .unwrap_or_else(|| FISTS.to_string());
        self.secondary = self.weapons.get(1).map(|w| w.name.clone());
    }
}

/// The five TAC-BAR axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TacStat {
    Tac,
    Dex,
    Str,
    Awr,
    End,
}

impl TacStat {
    pub const ALL: [TacStat; 5] = [Self::Tac, Self::Dex, Self::Str, Self::Awr, Self::End];

    pub fn as_str(&self) -> &'static str {
        match self {
            TacStat::Tac => "TAC",
            TacStat::Dex => "DEX",
            TacStat::Str => "STR",
            TacStat::Awr => "AWR",
            TacStat::End => "END",
        }
    }

    fn base_cost(&self) -> f64 {
        match self {
            TacStat::Tac => 200.0,
            TacStat::Dex => 150.0,
            TacStat::Str => 180.0,
            TacStat::Awr => 220.0,
            TacStat::End => 250.0,
        }
    }

    /// Price of the next level: base * 1.5^level, rounded down
    pub fn upgrade_cost(&self, current_level: u32) -> u64 {
        (self.base_cost() * 1.5f64.powi(current_level as i32)).floor() as u64
    }
}

/// TAC-BAR levels (all start at 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TacStats {
    pub tac: u32,
    pub dex: u32,
    pub str: u32,
    pub awr: u32,
    pub end: u32,
}

impl Default for TacStats {
    fn default() -> Self {
        Self { tac: 1, dex: 1, str: 1, awr: 1, end: 1 }
    }
}

impl TacStats {
    pub fn level(&self, stat: TacStat) -> u32 {
        match stat {
            TacStat::Tac => self.tac,
            TacStat::Dex => self.dex,
            TacStat::Str => self.str,
            TacStat::Awr => self.awr,
            TacStat::End => self.end,
        }
    }

    fn level_mut(&mut self, stat: TacStat) -> &mut u32 {
        match stat {
            TacStat::Tac => &mut self.tac,
            TacStat::Dex => &mut self.dex,
            TacStat::Str => &mut self.str,
            TacStat::Awr => &mut self.awr,
            TacStat::End => &mut self.end,
        }
    }
}

/// Armor equipment slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ArmorSlot {
    Helmet,
    Chest,
    Legs,
    Boots,
    Gloves,
    Shield,
}

/// Cosmetic categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CosmeticCategory {
    Skin,
    Trail,
    WeaponSkin,
    Emote,
}

/// Everything the player owns between waves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerResources {
    pub coins: u64,
    pub health: f32,
    pub max_health: f32,
    pub loadout: Loadout,
    /// Recruited ally names, in purchase order
    pub allies: Vec<String>,
    pub owned_armor: BTreeSet<String>,
    /// Equipped armor id per slot (absent = empty slot)
    pub armor: BTreeMap<ArmorSlot, String>,
    pub owned_cosmetics: BTreeSet<String>,
    pub cosmetics: BTreeMap<CosmeticCategory, String>,
    pub tac: TacStats,
}

impl Default for PlayerResources {
    fn default() -> Self {
        let cosmetics = [
            CosmeticCategory::Skin,
            CosmeticCategory::Trail,
            CosmeticCategory::WeaponSkin,
            CosmeticCategory::Emote,
        ]
        .into_iter()
        .map(|c| (c, "default".to_string()))
        .collect();

        Self {
            coins: STARTING_COINS,
            health: STARTING_HEALTH,
            max_health: STARTING_HEALTH,
            loadout: Loadout::default(),
            allies: Vec::new(),
            owned_armor: BTreeSet::new(),
            armor: BTreeMap::new(),
            owned_cosmetics: BTreeSet::new(),
            cosmetics,
            tac: TacStats::default(),
        }
    }
}

impl PlayerResources {
    fn spend(&mut self, cost: u64) -> Result<()> {
        if self.coins < cost {
            return Err(Error::InsufficientCoins {
                required: cost,
                available: self.coins,
            });
        }
        self.coins -= cost;
        Ok(())
    }

    /// Buy a weapon from the catalog at its listed price
    pub fn buy_weapon(&mut self, name: &str) -> Result<()> {
        let spec = catalog::weapon(name).ok_or_else(|| Error::UnknownItem(name.to_string()))?;
        if self.loadout.holds(name) {
            return Err(Error::AlreadyOwned(name.to_string()));
        }
        self.spend(spec.cost)?;
        self.loadout.add(spec.name);
        log::info!("Bought {} for {}", spec.name, spec.cost);
        Ok(())
    }

    /// Recruit an ally; each ally can be recruited once
    pub fn buy_ally(&mut self, name: &str) -> Result<()> {
        let spec = catalog::ally(name).ok_or_else(|| Error::UnknownItem(name.to_string()))?;
        if self.allies.iter().any(|a| a == name) {
            return Err(Error::AlreadyOwned(name.to_string()));
        }
        self.spend(spec.cost)?;
        self.allies.push(spec.name.to_string());
        log::info!("Recruited {}", spec.name);
        Ok(())
    }

    /// Raise one TAC-BAR stat by a level
    pub fn buy_tac_upgrade(&mut self, stat: TacStat) -> Result<u32> {
        let level = self.tac.level(stat);
        if level >= TAC_MAX_LEVEL {
            return Err(Error::MaxLevel(stat.as_str().to_string()));
        }
        self.spend(stat.upgrade_cost(level))?;
        let level = self.tac.level_mut(stat);
        *level += 1;
        Ok(*level)
    }

    pub fn buy_armor(&mut self, id: &str, cost: u64) -> Result<()> {
        if self.owned_armor.contains(id) {
            return Err(Error::AlreadyOwned(id.to_string()));
        }
        self.spend(cost)?;
        self.owned_armor.insert(id.to_string());
        Ok(())
    }

    pub fn equip_armor(&mut self, id: &str, slot: ArmorSlot) -> Result<()> {
        if !self.owned_armor.contains(id) {
            return Err(Error::NotOwned(id.to_string()));
        }
        self.armor.insert(slot, id.to_string());
        Ok(())
    }

    pub fn unequip_armor(&mut self, slot: ArmorSlot) -> Option<String> {
        self.armor.remove(&slot)
    }

    /// Buy a cosmetic and wear it straight away
    pub fn buy_cosmetic(&mut self, id: &str, category: CosmeticCategory, cost: u64) -> Result<()> {
        if self.owned_cosmetics.contains(id) {
            return Err(Error::AlreadyOwned(id.to_string()));
        }
        self.spend(cost)?;
        self.owned_cosmetics.insert(id.to_string());
        self.cosmetics.insert(category, id.to_string());
        Ok(())
    }

    pub fn equip_cosmetic(&mut self, id: &str, category: CosmeticCategory) -> Result<()> {
        if !self.owned_cosmetics.contains(id) {
            return Err(Error::NotOwned(id.to_string()));
        }
        self.cosmetics.insert(category, id.to_string());
        Ok(())
    }
}
