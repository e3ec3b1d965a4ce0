pub mod breakpoint;
pub mod cpu;
pub mod decoder;
pub mod disasm;
pub mod exec;
pub mod instructions;
pub mod interpreter;
pub mod memory;
pub mod operand;
pub mod resolve;

pub mod isa {
    pub mod dcpu16; // DCPU-16 v1.1
}

pub use cpu::{Cpu, CpuConfig, Status, Trap};
pub use interpreter::{Interpreter, RunExit};
pub use memory::{Bus, WordMemory};
pub use operand::{Operand, Reg};
