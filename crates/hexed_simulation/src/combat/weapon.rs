//! Weapon base - cooldown-gated оружие
//!
//! Состояния: Ready / Cooling down, определяются только временем:
//! `now < time_last_attacked + attack_cooldown` → Cooling down.
//!
//! Базовый `do_attack` не проверяет ammo/target/owner.
//! Конкретные виды оружия добавляют поведение через `WeaponKind`.

use bevy::ecs::component::Mutable;
use bevy::prelude::*;
use std::marker::PhantomData;

use crate::debug_helper::screen_log;
use crate::HexedSet;

/// Owner id для оружия которым никто не владеет
pub const NO_OWNER: i32 = -1;

/// Базовое оружие
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Weapon {
    /// Cooldown между атаками (секунды)
    pub attack_cooldown: f32,

    pub damage: u32,

    /// Время перезарядки (секунды)
    pub reload_time: f32,

    /// Время последней атаки (None = ещё ни разу не стамповали)
    time_last_attacked: Option<f32>,

    /// Кто последний владел оружием (player id)
    last_owned_player_id: i32,
}

impl Default for Weapon {
    fn default() -> Self {
        Self {
            attack_cooldown: 1.0,
            damage: 1,
            reload_time: 1.5,
            time_last_attacked: None,
            last_owned_player_id: NO_OWNER,
        }
    }
}

impl Weapon {
    pub fn new(attack_cooldown: f32, damage: u32) -> Self {
        Self {
            attack_cooldown,
            damage,
            ..default()
        }
    }

    pub fn is_in_cooldown(&self, now: f32) -> bool {
        match self.time_last_attacked {
            Some(last) => now < last + self.attack_cooldown,
            None => false,
        }
    }

    /// Атака: no-op в cooldown, иначе стампует текущее время
    ///
    /// Возвращает true если атака прошла.
    pub fn do_attack(&mut self, now: f32) -> bool {
        if self.is_in_cooldown(now) {
            return false;
        }

        self.time_last_attacked = Some(now);
        true
    }

    /// Стамп при входе в мир (оружие стартует в cooldown)
    pub fn begin_play(&mut self, now: f32) {
        self.time_last_attacked = Some(now);
    }

    pub fn time_last_attacked(&self) -> Option<f32> {
        self.time_last_attacked
    }

    pub fn last_owned_player_id(&self) -> i32 {
        self.last_owned_player_id
    }

    pub fn set_last_owned_player_id(&mut self, player_id: i32) {
        self.last_owned_player_id = player_id;
    }
}

/// Event: кто-то хочет атаковать этим оружием
#[derive(Event, Debug, Clone)]
pub struct WeaponAttackIntent {
    pub weapon: Entity,
}

/// Event: атака прошла (cooldown был готов)
#[derive(Event, Debug, Clone)]
pub struct WeaponAttacked {
    pub weapon: Entity,
    pub damage: u32,
}

/// System: стамп новых оружий текущим временем
pub fn begin_play_weapons(mut weapons: Query<(Entity, &mut Weapon), Added<Weapon>>, time: Res<Time>) {
    let now = time.elapsed_secs();

    for (entity, mut weapon) in weapons.iter_mut() {
        weapon.begin_play(now);
        crate::logger::log(&format!("Weapon {:?} begin play at {:.3}", entity, now));
        screen_log("BaseWeapon::BeginPlay()");
    }
}

/// System: WeaponAttackIntent → do_attack → WeaponAttacked
pub fn process_weapon_attack_intents(
    mut intents: EventReader<WeaponAttackIntent>,
    mut weapons: Query<&mut Weapon>,
    mut attacked: EventWriter<WeaponAttacked>,
    time: Res<Time>,
) {
    let now = time.elapsed_secs();

    for intent in intents.read() {
        let Ok(mut weapon) = weapons.get_mut(intent.weapon) else {
            continue;
        };

        if !weapon.do_attack(now) {
            continue;
        }

        screen_log("BaseWeapon::DoAttack()");
        crate::logger::log(&format!("🔫 Weapon {:?} attacked at {:.3}", intent.weapon, now));

        attacked.write(WeaponAttacked {
            weapon: intent.weapon,
            damage: weapon.damage,
        });
    }
}

/// Специализация оружия (пистолет, дробовик, ...)
///
/// Оба hook'а по умолчанию пустые. Конкретный вид переопределяет то, что ему
/// нужно, и регистрируется через `WeaponKindPlugin::<T>`.
pub trait WeaponKind: Component<Mutability = Mutable> {
    /// Один раз, в frame появления оружия (после стампа base weapon)
    fn begin_play(&mut self, _weapon: &mut Weapon) {}

    /// Каждый frame
    fn tick(&mut self, _weapon: &mut Weapon, _delta: f32) {}
}

fn begin_play_weapon_kind<T: WeaponKind>(mut weapons: Query<(&mut T, &mut Weapon), Added<T>>) {
    for (mut kind, mut weapon) in weapons.iter_mut() {
        kind.begin_play(&mut weapon);
    }
}

fn tick_weapon_kind<T: WeaponKind>(mut weapons: Query<(&mut T, &mut Weapon)>, time: Res<Time>) {
    let delta = time.delta_secs();

    for (mut kind, mut weapon) in weapons.iter_mut() {
        kind.tick(&mut weapon, delta);
    }
}

/// Регистрирует hooks конкретного вида оружия
pub struct WeaponKindPlugin<T>(PhantomData<T>);

impl<T> Default for WeaponKindPlugin<T> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T: WeaponKind> Plugin for WeaponKindPlugin<T> {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (begin_play_weapon_kind::<T>, tick_weapon_kind::<T>)
                .chain()
                .after(begin_play_weapons)
                .in_set(HexedSet::Combat),
        );
    }
}
