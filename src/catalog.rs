//! Static lookup tables consumed by the simulation
//!
//! The arena only needs to know a weapon's name, whether it fires bullets,
//! and what it costs in the shop. Ally entries carry the stats a recruit is
//! spawned with.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Name of the always-available bare-hands weapon
pub const FISTS: &str = "Fists";

/// How a weapon is used in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponClass {
    /// Fires bullets on left click
    Ranged,
    /// Swung on click; hits everything in melee reach
    Melee,
}

/// A purchasable weapon
#[derive(Debug, Clone, Copy)]
pub struct WeaponSpec {
    pub name: &'static str,
    pub class: WeaponClass,
    pub cost: u64,
}

const fn ranged(name: &'static str, cost: u64) -> WeaponSpec {
    WeaponSpec { name, class: WeaponClass::Ranged, cost }
}

const fn melee(name: &'static str, cost: u64) -> WeaponSpec {
    WeaponSpec { name, class: WeaponClass::Melee, cost }
}

/// Weapon catalog
pub const WEAPONS: &[WeaponSpec] = &[
    // Handguns
    ranged("Glock 19", 500),
    ranged("Desert Eagle", 800),
    ranged("M1911", 600),
    ranged("Beretta M9", 550),
    ranged("FN Five-seveN", 750),
    ranged("Colt Python", 900),
    ranged("Mateba Autorevolver", 950),
    ranged("CZ-75 Shadow", 700),
    ranged("H&K USP", 650),
    ranged("SIG Sauer P226", 680),
    // SMGs
    ranged("MP5", 1200),
    ranged("Uzi", 1000),
    ranged("P90", 1500),
    ranged("MAC-10", 800),
    ranged("Vector KRISS", 1800),
    ranged("Scorpion EVO 3", 1300),
    ranged("PP-19 Bizon", 1100),
    ranged("MP7", 1600),
    // Assault rifles
    ranged("AK-47", 2500),
    ranged("M4A1", 2800),
    ranged("FAMAS", 2600),
    ranged("AUG", 2700),
    ranged("SCAR-L", 3000),
    ranged("FN F2000", 2900),
    ranged("G36C", 2750),
    ranged("AN-94", 3200),
    ranged("QBZ-95", 2400),
    // Shotguns
    ranged("SPAS-12", 2000),
    ranged("Remington 870", 1800),
    ranged("Mossberg 500", 1900),
    ranged("AA-12", 4000),
    ranged("Saiga-12", 3000),
    ranged("Double-barrel", 1500),
    ranged("Winchester 1887", 2200),
    // Sniper rifles
    ranged("Barrett M82", 8000),
    ranged("Dragunov SVD", 6000),
    ranged("M24", 7000),
    ranged("AWM", 9000),
    ranged("Kar98k", 5000),
    ranged("CheyTac M200", 12000),
    ranged("MK14 EBR", 5500),
    ranged("Mosin-Nagant", 4500),
    // LMGs
    ranged("M249 SAW", 5000),
    ranged("RPK", 5500),
    ranged("PKM", 6000),
    ranged("MG42", 6500),
    ranged("FN Minimi", 5200),
    ranged("HK21E", 5800),
    // Exotic
    ranged("Railgun", 15000),
    ranged("Gauss Rifle", 12000),
    ranged("Plasma Blaster", 8000),
    ranged("Laser Carbine", 7000),
    ranged("Arc Cannon", 10000),
    ranged("Flamethrower", 6000),
    ranged("Tesla Rifle", 9000),
    ranged("Cryo Gun", 7500),
    ranged("Smart Gun", 11000),
    ranged("Gravity Pulse Blaster", 13000),
    // Blades
    melee("Katana", 0),
    melee("Wakizashi", 800),
    melee("Tanto", 600),
    melee("Broadsword", 1200),
    melee("Claymore", 2000),
    melee("Scimitar", 1000),
    melee("Rapier", 1100),
    melee("Cutlass", 900),
    melee("Falchion", 1300),
    melee("Jian", 1150),
    // Blunt
    melee("Baseball Bat", 400),
    melee("Nail Bat", 800),
    melee("Sledgehammer", 1000),
    melee("Mace", 1200),
    melee("Morning Star", 1500),
    melee("Warhammer", 1800),
    melee("Club", 200),
    melee("Crowbar", 350),
    // Knives
    melee("Combat Knife", 300),
    melee("Karambit", 500),
    melee("Kukri", 600),
    melee("Bowie Knife", 450),
    melee("Push Dagger", 350),
    melee("Trench Knife", 700),
    melee("Butterfly Knife", 400),
    melee("Switchblade", 250),
    // Polearms
    melee("Naginata", 1500),
    melee("Halberd", 1800),
    melee("Glaive", 1600),
    melee("Spear", 800),
    melee("Bo Staff", 600),
    melee("Pike", 1200),
    melee("Trident", 1400),
    // Improvised
    melee("Wrench", 200),
    melee("Frying Pan", 150),
    melee("Pipe", 100),
    melee("Chainsaw", 3000),
    melee("Hatchet", 400),
    melee("Meat Cleaver", 300),
    melee("Tire Iron", 250),
    melee("Broken Bottle", 50),
    // Sci-fi
    melee("Energy Sword", 4000),
    melee("Plasma Blade", 5000),
    melee("Chainblade", 6000),
    melee("Vibro-Knife", 2000),
    melee("Gravity Hammer", 8000),
    melee("Light Axe", 4500),
    melee("Electro-Whip", 3500),
];

/// Look up a weapon by display name
pub fn weapon(name: &str) -> Option<&'static WeaponSpec> {
    WEAPONS.iter().find(|w| w.name == name)
}

/// Whether the named weapon fires bullets. Unknown names count as unarmed.
pub fn is_ranged(name: &str) -> bool {
    matches!(weapon(name), Some(w) if w.class == WeaponClass::Ranged)
}

/// Weapons enemies may carry, by tier (tier = min(wave / 3, 4))
pub const ENEMY_WEAPON_TIERS: [&[&str]; 5] = [
    &["Glock 19", "M1911", "Beretta M9"],
    &["Desert Eagle", "Colt Python", "MP5", "Uzi"],
    &["AK-47", "M4A1", "SPAS-12", "Remington 870"],
    &["Barrett M82", "Dragunov SVD", "M249 SAW", "AA-12"],
    &["Railgun", "Plasma Blaster", "Laser Carbine", "Arc Cannon"],
];

/// A recruitable ally
#[derive(Debug, Clone, Copy)]
pub struct AllySpec {
    pub name: &'static str,
    pub cost: u64,
    pub health: f32,
    pub damage: f32,
    pub weapon: Option<&'static str>,
    /// Only offered when the shop rolls its special stock
    pub special: bool,
}

/// Ally catalog
pub const ALLIES: &[AllySpec] = &[
    AllySpec { name: "Soldier", cost: 1000, health: 100.0, damage: 30.0, weapon: Some("M4A1"), special: false },
    AllySpec { name: "Medic", cost: 1500, health: 80.0, damage: 20.0, weapon: Some("MP5"), special: false },
    AllySpec { name: "Heavy Gunner", cost: 2000, health: 200.0, damage: 50.0, weapon: Some("M249 SAW"), special: false },
    AllySpec { name: "Sniper", cost: 2500, health: 60.0, damage: 100.0, weapon: Some("Barrett M82"), special: false },
    AllySpec { name: "Engineer", cost: 1800, health: 90.0, damage: 25.0, weapon: Some("SPAS-12"), special: false },
    AllySpec { name: "Hank J. Wimbleton", cost: 5000, health: 300.0, damage: 80.0, weapon: Some("Desert Eagle"), special: true },
    AllySpec { name: "Sanford", cost: 4000, health: 250.0, damage: 70.0, weapon: Some("Remington 870"), special: true },
    AllySpec { name: "Deimos", cost: 4500, health: 220.0, damage: 90.0, weapon: Some("Uzi"), special: true },
    AllySpec { name: "Tricky the Clown", cost: 8000, health: 400.0, damage: 120.0, weapon: None, special: true },
    AllySpec { name: "Jebus", cost: 7000, health: 350.0, damage: 100.0, weapon: Some("Plasma Blaster"), special: true },
    AllySpec { name: "The Auditor", cost: 10000, health: 500.0, damage: 150.0, weapon: Some("Railgun"), special: true },
];

/// Look up an ally by display name
pub fn ally(name: &str) -> Option<&'static AllySpec> {
    ALLIES.iter().find(|a| a.name == name)
}

/// Chance that a shop visit also offers the special allies
pub const SPECIAL_STOCK_CHANCE: f32 = 0.3;

/// Roll whether this shop visit carries special stock
pub fn roll_special_stock<R: Rng>(rng: &mut R) -> bool {
    rng.random::<f32>() < SPECIAL_STOCK_CHANCE
}

/// Allies on sale: the regular roster, plus the specials when stocked
pub fn shop_allies(special_stock: bool) -> impl Iterator<Item = &'static AllySpec> {
    ALLIES.iter().filter(move |a| special_stock || !a.special)
}
