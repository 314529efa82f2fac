// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Row-by-row checks of the legal-target table.

use mheg_foundation::ObjectKind::{self, *};
use mheg_instructions::{Opcode, TargetRule};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn kinds(op: Opcode) -> Vec<ObjectKind> {
    match op.legal_targets() {
        TargetRule::Kinds(kinds) => {
            let mut kinds = kinds.to_vec();
            kinds.sort();
            kinds
        }
        other => panic!("{op} has rule {other:?}"),
    }
}

fn sorted(mut kinds: Vec<ObjectKind>) -> Vec<ObjectKind> {
    kinds.sort();
    kinds
}

#[test]
fn arithmetic_targets_integer_variables_only() {
    for op in [Opcode::Add, Opcode::Subtract, Opcode::Multiply, Opcode::Divide, Opcode::Modulo] {
        assert_eq!(kinds(op), vec![IntegerVariable]);
    }
    assert_eq!(kinds(Opcode::Append), vec![OctetStringVariable]);
}

#[test]
fn stacking_order_rows_match() {
    let expected =
        sorted(vec![Bitmap, DynamicLineArt, EntryField, HyperText, Rectangle, Slider, Text, Video]);
    for op in [
        Opcode::BringToFront,
        Opcode::SendToBack,
        Opcode::PutBefore,
        Opcode::PutBehind,
        Opcode::GetPosition,
        Opcode::SetPosition,
        Opcode::GetBoxSize,
        Opcode::SetBoxSize,
    ] {
        assert_eq!(kinds(op), expected, "{op}");
    }
}

#[test]
fn application_only_rows() {
    for op in [
        Opcode::OpenConnection,
        Opcode::CloseConnection,
        Opcode::GetEngineSupport,
        Opcode::LockScreen,
        Opcode::UnlockScreen,
        Opcode::Quit,
        Opcode::ReadPersistent,
        Opcode::StorePersistent,
    ] {
        assert_eq!(kinds(op), vec![Application], "{op}");
    }
    assert_eq!(kinds(Opcode::SetTimer), vec![Application, Scene]);
    assert_eq!(kinds(Opcode::SendEvent), vec![Scene]);
}

#[test]
fn launch_and_spawn_act_on_the_active_application() {
    assert_eq!(Opcode::Launch.legal_targets(), TargetRule::ActiveApplication);
    assert_eq!(Opcode::Spawn.legal_targets(), TargetRule::ActiveApplication);
}

#[test]
fn groups_are_never_unloaded_by_action() {
    let unloadable = kinds(Opcode::Unload);
    assert!(!unloadable.contains(&Application));
    assert!(!unloadable.contains(&Scene));
    assert!(unloadable.contains(&Palette));
}

#[test]
fn clone_covers_every_variable() {
    let clonable = kinds(Opcode::Clone);
    for kind in ObjectKind::ALL.iter().filter(|k| k.is_variable()) {
        assert!(clonable.contains(kind), "{kind}");
    }
    assert!(!clonable.contains(&Stream));
}

proptest! {
    #[test]
    fn every_opcode_has_a_rule(index in 0usize..122) {
        let op = Opcode::ALL[index];
        match op.legal_targets() {
            TargetRule::Kinds(kinds) => prop_assert!(!kinds.is_empty()),
            TargetRule::AnyKind | TargetRule::ActiveApplication => {}
        }
    }
}
