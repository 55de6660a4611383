//! Testing methods on cricket's public API

use cricket::prelude::*;
use rand::rngs::mock::StepRng;

fn machine(program: &[u8]) -> Chip8 {
    let mut ch8 = Chip8::default();
    ch8.load_program(program).unwrap();
    ch8
}

fn rng() -> StepRng {
    StepRng::new(0, 1)
}

#[test]
fn chip8() {
    let ch8 = Chip8::default(); // Default
    let ch82 = ch8.clone(); // Clone
    assert_eq!(ch8, ch82); // PartialEq
    println!("{ch8:?}"); // Debug
}

#[test]
fn set_v0_then_increment() {
    // 6001: v0 = 1; 7001: v0 += 1
    let mut ch8 = machine(&[0x60, 0x01, 0x70, 0x01]);
    ch8.step(&mut rng()).unwrap().step(&mut rng()).unwrap();
    assert_eq!(2, ch8.regs.get(0));
    assert_eq!(0x204, ch8.cpu.pc());
}

#[test]
fn immediate_add_wraps_and_spares_the_flag() {
    // 60FF: v0 = 0xFF; 70FF: v0 += 0xFF -> 0x1FE mod 256
    let mut ch8 = machine(&[0x60, 0xFF, 0x70, 0xFF]);
    ch8.step(&mut rng()).unwrap().step(&mut rng()).unwrap();
    assert_eq!(254, ch8.regs.get(0));
    assert_eq!(0, ch8.regs.get(0xF), "7xkk tracks no carry");
}

#[test]
fn load_index_register() {
    let mut ch8 = machine(&[0xA0, 0xFF]);
    ch8.step(&mut rng()).unwrap();
    assert_eq!(255, ch8.cpu.i());
}

#[test]
fn wait_for_key_rearms_until_a_key_arrives() {
    let mut ch8 = machine(&[0xF4, 0x0A]);
    for _ in 0..5 {
        ch8.step(&mut rng()).unwrap();
        assert_eq!(0x200, ch8.cpu.pc());
    }
    ch8.press(0x9).unwrap();
    ch8.step(&mut rng()).unwrap();
    assert_eq!(0x202, ch8.cpu.pc());
    assert_eq!(0x9, ch8.regs.get(4));
}

#[test]
fn subroutine_call_returns_past_the_call_site() {
    // 0x200: call 0x206; 0x206: v1 = 7; 0x208: ret
    let mut ch8 = machine(&[0x22, 0x06, 0x00, 0x00, 0x00, 0x00, 0x61, 0x07, 0x00, 0xEE]);
    for _ in 0..3 {
        ch8.step(&mut rng()).unwrap();
    }
    assert_eq!(7, ch8.regs.get(1));
    assert_eq!(0x202, ch8.cpu.pc());
}

#[test]
fn clear_screen_marks_the_display_dirty() {
    let mut ch8 = machine(&[0x00, 0xE0]);
    ch8.screen.toggle(5, 5);
    ch8.step(&mut rng()).unwrap();
    assert!(!ch8.screen.get(5, 5));
    assert!(ch8.cpu.draw_flag());
}

#[test]
fn oversized_program_is_rejected() {
    let mut ch8 = Chip8::default();
    let err = ch8.load_program(&vec![0; 4096]).unwrap_err();
    assert!(matches!(err, Error::ProgramTooLarge { .. }));
}

#[test]
fn keys_round_trip_through_the_aggregate() {
    let mut ch8 = Chip8::default();
    assert!(ch8.press(0x3).unwrap());
    assert!(!ch8.press(0x3).unwrap());
    assert!(ch8.keys.is_pressed(0x3));
    assert!(ch8.release(0x3).unwrap());
    assert!(matches!(ch8.press(0x10), Err(Error::InvalidKey { key: 0x10 })));
}
