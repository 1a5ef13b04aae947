// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Effect Layer Boundary
//!
//! Capability table through which the effect layer (ramp, periodic, spring, damper and custom
//! forces) is reached. This crate only declares it; effect storage, lifecycle and report parsing
//! live with each platform's implementation. Parameter blocks are passed through as raw bytes.

use crate::error::Error;

/// Maximum number of parallel effects in memory.
pub const MAX_EFFECTS: usize = 20;

/// Duration value meaning "play until stopped".
pub const DURATION_INFINITE: u16 = 0x7FFF;

/// 1-based effect block index.
pub type EffectId = u8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectType {
    Constant = 0x01,
    Ramp = 0x02,
    Square = 0x03,
    Sine = 0x04,
    Triangle = 0x05,
    SawtoothDown = 0x06,
    SawtoothUp = 0x07,
    Spring = 0x08,
    Damper = 0x09,
    Inertia = 0x0A,
    Friction = 0x0B,
    Custom = 0x0C,
}

impl EffectType {
    /// Condition effects derive their force from axis position or motion.
    pub fn is_condition(self) -> bool {
        matches!(
            self,
            EffectType::Spring | EffectType::Damper | EffectType::Inertia | EffectType::Friction
        )
    }

    pub fn is_periodic(self) -> bool {
        matches!(
            self,
            EffectType::Square
                | EffectType::Sine
                | EffectType::Triangle
                | EffectType::SawtoothDown
                | EffectType::SawtoothUp
        )
    }
}

impl TryFrom<u8> for EffectType {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Ok(match id {
            0x01 => EffectType::Constant,
            0x02 => EffectType::Ramp,
            0x03 => EffectType::Square,
            0x04 => EffectType::Sine,
            0x05 => EffectType::Triangle,
            0x06 => EffectType::SawtoothDown,
            0x07 => EffectType::SawtoothUp,
            0x08 => EffectType::Spring,
            0x09 => EffectType::Damper,
            0x0A => EffectType::Inertia,
            0x0B => EffectType::Friction,
            0x0C => EffectType::Custom,
            other => return Err(Error::UnknownEffectType(other)),
        })
    }
}

/// Effect slot state bits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectState {
    raw: u8,
}

impl EffectState {
    pub const FREE: Self = Self { raw: 0x00 };
    pub const ALLOCATED: u8 = 0x01;
    pub const PLAYING: u8 = 0x02;

    #[inline]
    pub fn raw(&self) -> u8 {
        self.raw
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.raw == 0
    }

    #[inline]
    pub fn is_allocated(&self) -> bool {
        (self.raw & Self::ALLOCATED) != 0
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        (self.raw & Self::PLAYING) != 0
    }

    pub fn set_allocated(&mut self, on: bool) {
        self.set_bit(Self::ALLOCATED, on);
    }

    pub fn set_playing(&mut self, on: bool) {
        self.set_bit(Self::PLAYING, on);
    }

    fn set_bit(&mut self, bit: u8, on: bool) {
        if on {
            self.raw |= bit;
        } else {
            self.raw &= !bit;
        }
    }
}

/// Book-keeping for one effect slot, filled in by the effect layer.
///
/// USB gives the fade time relative to the end of the effect, so the duration is kept alongside
/// it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectSlot {
    pub state: EffectState,
    pub effect_type: Option<EffectType>,
    pub duration: u16,
    pub fade_time: u16,
    pub gain: u8,
    pub offset: u8,
    pub attack_level: u8,
    pub fade_level: u8,
    pub magnitude: u8,
}

/// Toggle of the centering force, the one capability this crate provides to the effect layer.
pub trait AutoCenter {
    fn set_auto_center(&mut self, enable: bool);
}

/// Per-platform effect driver.
pub trait EffectDriver {
    fn enable_interrupts(&mut self);

    /// Vendor message header sent before every effect command.
    fn sysex_header(&self) -> &'static [u8];

    fn set_auto_center(&mut self, enable: bool);

    fn start_effect(&mut self, id: EffectId);
    fn stop_effect(&mut self, id: EffectId);
    fn free_effect(&mut self, id: EffectId);

    fn modify_duration(&mut self, id: EffectId, duration: u16);

    fn create_new_effect(
        &mut self,
        effect_type: EffectType,
        byte_count: u16,
        slot: &mut EffectSlot,
    );
    fn set_envelope(&mut self, params: &[u8], slot: &mut EffectSlot);
    fn set_condition(&mut self, params: &[u8], slot: &mut EffectSlot);
    fn set_periodic(&mut self, params: &[u8], slot: &mut EffectSlot);
    fn set_constant_force(&mut self, params: &[u8], slot: &mut EffectSlot);
    fn set_ramp_force(&mut self, params: &[u8], slot: &mut EffectSlot);

    /// Returns true if the effect parameters were accepted.
    fn set_effect(&mut self, params: &[u8], slot: &mut EffectSlot) -> bool;
}
