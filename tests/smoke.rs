use dcpu16_rs::memory::words_to_le_bytes;
use dcpu16_rs::{CpuConfig, Interpreter, Reg, RunExit};

#[test]
fn image_runs_to_crash_loop() {
    //  0: SET A, 0x30
    //  2: SET [0x1000], 0x20
    //  5: SUB A, [0x1000]
    //  7: IFN A, 0x10
    //  8: SET PC, 0x000A      (skipped)
    // 10: SET PC, 0x000A      (:crash)
    let words = [
        0x7C01, 0x0030, 0x7DE1, 0x1000, 0x0020, 0x7803, 0x1000, 0xC00D, 0x7DC1, 0x000A, 0x7DC1,
        0x000A,
    ];
    let mut vm = Interpreter::new(CpuConfig::default());
    vm.load_bytes(&words_to_le_bytes(&words)).unwrap();

    let exit = vm.run(Some(100), |cpu, _| cpu.pc == 10).unwrap();
    assert_eq!(exit, RunExit::Halted);
    assert_eq!(vm.cpu.reg(Reg::A), 0x10);
    assert_eq!(vm.mem.mem[0x1000], 0x20);
    assert_eq!(vm.cpu.o, 0);
}
