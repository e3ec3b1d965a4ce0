use dcpu16_rs::decoder::pack;
use dcpu16_rs::disasm::{disassemble, fmt_registers};
use dcpu16_rs::isa::dcpu16::Dcpu16Decoder;
use dcpu16_rs::{Cpu, CpuConfig, Reg};

#[test]
fn disasm_basic_and_jsr() {
    let dec = Dcpu16Decoder::new();

    let (s, len) = disassemble(&dec, &[0x7C01, 0x0030]).unwrap();
    assert_eq!(s, "SET A, 0x0030");
    assert_eq!(len, 2);

    let (s, len) = disassemble(&dec, &[pack(0x1, 0x16, 0x1E), 0x2000, 0x1000]).unwrap();
    assert_eq!(s, "SET [0x2000+I], [0x1000]");
    assert_eq!(len, 3);

    let (s, len) = disassemble(&dec, &[pack(0, 0x01, 0x1F), 0x0040]).unwrap();
    assert_eq!(s, "JSR 0x0040");
    assert_eq!(len, 2);

    let (s, _) = disassemble(&dec, &[pack(0xD, 0x18, 0x2A)]).unwrap();
    assert_eq!(s, "IFN POP, 0xa");
}

#[test]
fn undecodable_word_is_data() {
    let dec = Dcpu16Decoder::new();
    let (s, len) = disassemble(&dec, &[0x0000]).unwrap();
    assert!(s.starts_with("DAT 0x0000"));
    assert_eq!(len, 1);
    assert!(disassemble(&dec, &[]).is_none());
}

#[test]
fn register_dump() {
    let mut cpu = Cpu::new(CpuConfig::default());
    cpu.set_reg(Reg::A, 0x3A);
    assert_eq!(
        fmt_registers(&cpu),
        "A=003a B=0000 C=0000 X=0000 Y=0000 Z=0000 I=0000 J=0000 PC=0000 SP=ffff O=0000"
    );
}
