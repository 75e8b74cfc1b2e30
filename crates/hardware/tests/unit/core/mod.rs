/// ALU operand routing and arithmetic.
pub mod alu;


/// Per-opcode microprogram behaviour.
pub mod microprograms;
