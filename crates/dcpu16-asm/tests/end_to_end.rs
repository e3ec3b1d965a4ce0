use dcpu16_asm::{assemble, AsmOptions};
use dcpu16_rs::{Interpreter, Reg, RunExit};
use pretty_assertions::assert_eq;

fn load(src: &str) -> Interpreter {
    let asm = assemble(src, AsmOptions::default()).unwrap();
    let mut vm = Interpreter::default();
    vm.load_bytes(&asm.to_bytes()).unwrap();
    vm
}

#[test]
fn set_add_two_cycles() {
    let mut vm = load("SET A, 0x30\nADD A, 10\n");
    vm.step().unwrap();
    vm.step().unwrap();
    assert_eq!(vm.cpu.reg(Reg::A), 0x3A);
    assert_eq!(vm.cpu.o, 0);
}

#[test]
fn failed_ife_suppresses_next_set() {
    let mut vm = load("SET A, 5\nIFE A, 6\nSET A, 99\nSET B, 1\n");
    // four instructions, one of them skipped
    assert_eq!(vm.run(Some(4), |_, _| false).unwrap(), RunExit::BudgetExhausted);
    assert_eq!(vm.cpu.reg(Reg::A), 5);
    assert_eq!(vm.cpu.reg(Reg::B), 1);
}

#[test]
fn subroutine_call_and_loop() {
    // Sum 1..=5 into A through a subroutine, then spin on :halt
    let src = "
        SET I, 5
:loop   JSR add_i
        SUB I, 1
        IFN I, 0
            SET PC, loop
:halt   SET PC, halt

:add_i  ADD A, I      ; accumulate
        SET PC, POP
";
    let mut vm = load(src);
    let halt = {
        let asm = assemble(src, AsmOptions::default()).unwrap();
        asm.labels.iter().find(|l| l.name == "HALT").unwrap().address
    };
    let exit = vm.run(Some(1_000), move |cpu, _| cpu.pc == halt).unwrap();
    assert_eq!(exit, RunExit::Halted);
    assert_eq!(vm.cpu.reg(Reg::A), 15);
    assert_eq!(vm.cpu.reg(Reg::I), 0);
    assert_eq!(vm.cpu.sp, 0xFFFF);
}

#[test]
fn memory_copy_with_indexed_operands() {
    let src = "
        SET I, 0
:copy   SET [0x2000+I], [0x1000+I]
        ADD I, 1
        IFG 3, I
            SET PC, copy
:end    SET PC, end
";
    let mut vm = load(src);
    vm.mem.mem[0x1000..0x1003].copy_from_slice(&[7, 8, 9]);
    vm.run(Some(100), |_, _| false).unwrap();
    assert_eq!(&vm.mem.mem[0x2000..0x2003], &[7, 8, 9]);
    assert_eq!(vm.cpu.reg(Reg::I), 3);
}

#[test]
fn listing_tracks_addresses() {
    let asm = assemble("SET A, 0x30\n\n; comment\nSET [0x1000], 0x20\n", AsmOptions::default()).unwrap();
    let rows: Vec<(usize, u16, Vec<u16>)> =
        asm.listing.iter().map(|l| (l.line, l.address, l.words.clone())).collect();
    assert_eq!(
        rows,
        vec![(1, 0, vec![0x7C01, 0x0030]), (4, 2, vec![0x7DE1, 0x1000, 0x0020])]
    );
    assert_eq!(asm.to_bytes(), vec![0x01, 0x7C, 0x30, 0x00, 0xE1, 0x7D, 0x00, 0x10, 0x20, 0x00]);
}
