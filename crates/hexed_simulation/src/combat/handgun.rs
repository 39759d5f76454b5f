//! Handgun - первый конкретный вид оружия
//!
//! Пока stub: использует дефолтные (пустые) hooks `WeaponKind`.

use bevy::prelude::*;

use super::weapon::{Weapon, WeaponKind};

#[derive(Component, Debug, Clone, Copy, Default)]
#[require(Weapon)]
pub struct Handgun;

impl WeaponKind for Handgun {}
