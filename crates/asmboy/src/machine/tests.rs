use asmboy_common::{Operand, Register, Word};

use super::*;
use crate::config::{STDERR, STDIN, STDOUT};
use crate::cpu::Flags;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn reg(name: &str) -> Operand {
    Operand::register(name)
}

fn imm(value: Word) -> Operand {
    Operand::constant(value)
}

fn dev(label: &str) -> Operand {
    Operand::address(label, 0)
}

fn label(name: &str, value: Word) -> Operand {
    Operand::label(name, value)
}

fn inst(name: &str, operands: Vec<Operand>) -> Instruction {
    Instruction::new(name, operands)
}

fn machine(program: Vec<Instruction>, memory: MemoryController) -> Machine {
    init_logger();
    Machine::new(program, memory, Config::default())
}

fn reg_value(machine: &Machine, name: &str) -> Word {
    machine.registers().get(&Register::new(name)).unwrap()
}

#[test]
fn countdown_prints_digits() {
    let program = vec![
        inst("mov", vec![reg("A"), imm(3)]),
        inst("movn", vec![dev(STDOUT), reg("A")]),
        inst("dec", vec![reg("A")]),
        inst("cmp", vec![reg("A"), imm(0)]),
        inst("jne", vec![label("loop", 1)]),
        inst("hlt", vec![]),
    ];
    let mut machine = machine(program, MemoryController::default());
    let summary = machine.run().unwrap();

    assert_eq!(machine.memory().stdout(), "321");
    assert_eq!(reg_value(&machine, "A"), 0);
    // MOV 2, three loop passes of MOVN 3 + DEC 2 + CMP 2 + JNE 1, HLT 2.
    assert_eq!(
        summary,
        RunSummary {
            ticks: 28,
            instructions: 14,
        }
    );
    assert!(machine.alu().flags().contains(Flags::Z));
}

#[test]
fn reads_doubles_and_prints_a_number() {
    let program = vec![
        inst("ldn", vec![reg("A"), dev(STDIN)]),
        inst("add", vec![reg("A"), reg("A")]),
        inst("movn", vec![dev(STDOUT), reg("A")]),
        inst("mov", vec![dev(STDOUT), imm('\n' as Word)]),
        inst("hlt", vec![]),
    ];
    let mut memory = MemoryController::default();
    memory.feed_input("21");
    let mut machine = machine(program, memory);
    machine.run().unwrap();
    assert_eq!(machine.memory().stdout(), "42\n");
}

#[test]
fn sums_an_array_through_an_indirect_address() {
    let program = vec![
        inst("mov", vec![reg("B"), imm(0)]),
        inst("mov", vec![reg("C"), imm(0)]),
        inst("add", vec![reg("C"), Operand::indirect("data", 0, reg("B"))]),
        inst("inc", vec![reg("B")]),
        inst("cmp", vec![reg("B"), imm(4)]),
        inst("jl", vec![label("loop", 2)]),
        inst("movn", vec![dev(STDOUT), reg("C")]),
        inst("hlt", vec![]),
    ];
    let mut memory = MemoryController::default();
    memory.load("data", vec![1, 2, 3, 4]);
    let mut machine = machine(program, memory);
    machine.run().unwrap();
    assert_eq!(reg_value(&machine, "C"), 10);
    assert_eq!(machine.memory().stdout(), "10");
}

#[test]
fn stderr_is_a_separate_sink() {
    let program = vec![
        inst("mov", vec![dev(STDERR), imm('e' as Word)]),
        inst("mov", vec![dev(STDOUT), imm('o' as Word)]),
        inst("hlt", vec![]),
    ];
    let mut machine = machine(program, MemoryController::default());
    machine.run().unwrap();
    assert_eq!(machine.memory().stderr(), "e");
    assert_eq!(machine.memory_mut().take_stdout(), "o");
    assert_eq!(machine.memory().stdout(), "");
}

#[test]
fn halt_alone_costs_two_cycles() {
    let mut machine = machine(vec![inst("hlt", vec![])], MemoryController::default());
    let summary = machine.run().unwrap();
    assert_eq!(
        summary,
        RunSummary {
            ticks: 2,
            instructions: 1,
        }
    );
    assert_eq!(machine.registers().instruction_pointer(), 1);
}

#[test]
fn step_cycle_and_step_instruction() {
    let program = vec![
        inst("add", vec![reg("A"), reg("B")]),
        inst("inc", vec![reg("A")]),
        inst("hlt", vec![]),
    ];
    let mut machine = machine(program, MemoryController::default());

    assert_eq!(machine.step_cycle().unwrap(), Step::Cycle);
    assert!(machine.cpu().is_busy());
    assert_eq!(machine.cpu().current().unwrap().name, "add");
    // Finish ADD, then run INC in one go.
    assert_eq!(machine.step_instruction().unwrap(), Step::Retired);
    assert_eq!(machine.registers().instruction_pointer(), 1);
    assert_eq!(machine.step_instruction().unwrap(), Step::Retired);
    assert_eq!(reg_value(&machine, "A"), 1);
    assert_eq!(machine.step_instruction().unwrap(), Step::Halted);
    assert_eq!(machine.clock().instructions(), 3);
}

#[test]
fn running_off_the_program_faults() {
    let mut machine = machine(
        vec![inst("inc", vec![reg("A")])],
        MemoryController::default(),
    );
    assert!(matches!(
        machine.run(),
        Err(Error::InstructionPointerOutOfRange(1))
    ));
    assert_eq!(reg_value(&machine, "A"), 1);
}

#[test]
fn cycle_limit_stops_endless_loops() {
    init_logger();
    let program = vec![inst("jmp", vec![label("self", 0)])];
    let config = Config::builder().cycle_limit(10).build();
    let mut machine = Machine::new(program, MemoryController::default(), config);
    assert!(matches!(machine.run(), Err(Error::CycleLimitExceeded(10))));
    assert_eq!(machine.clock().ticks(), 11);
}

#[test]
fn faults_keep_earlier_writes() {
    let program = vec![
        inst("mov", vec![reg("A"), imm(5)]),
        inst("movn", vec![dev(STDOUT), imm(12)]),
        inst("div", vec![reg("A"), imm(0)]),
        inst("hlt", vec![]),
    ];
    let mut machine = machine(program, MemoryController::default());
    assert!(matches!(machine.run(), Err(Error::ZeroDivision)));
    assert_eq!(reg_value(&machine, "A"), 5);
    assert_eq!(machine.memory().stdout(), "12");
    assert_eq!(machine.registers().instruction_pointer(), 2);
    assert_eq!(machine.cpu().current().unwrap().name, "div");
}

#[test]
fn custom_terminator_and_registers() {
    init_logger();
    let program = vec![
        inst("ldn", vec![reg("X"), dev(STDIN)]),
        inst("ldn", vec![reg("Y"), dev(STDIN)]),
        inst("sub", vec![reg("X"), reg("Y")]),
        inst("hlt", vec![]),
    ];
    let config = Config::builder()
        .null_term(';' as Word)
        .registers(vec!["X".to_string(), "Y".to_string()])
        .build();
    let mut memory = MemoryController::default();
    memory.feed_input("50;8;");
    let mut machine = Machine::new(program, memory, config);
    machine.run().unwrap();
    assert_eq!(reg_value(&machine, "X"), 42);
    assert!(machine.registers().get(&Register::new("A")).is_err());
}

#[test]
fn config_terminator_reaches_default_memory() {
    init_logger();
    let program = vec![
        inst("ldn", vec![reg("A"), dev(STDIN)]),
        inst("hlt", vec![]),
    ];
    let config = Config::builder()
        .null_term('\n' as Word)
        .cycle_limit(1000)
        .build();
    let mut memory = MemoryController::default();
    memory.feed_input("42");
    let mut machine = Machine::new(program, memory, config);
    assert_eq!(machine.memory().null_term(), '\n' as Word);

    let summary = machine.run().unwrap();
    assert_eq!(reg_value(&machine, "A"), 42);
    // One cycle per digit plus overhead, then HLT's two.
    assert_eq!(summary, RunSummary { ticks: 5, instructions: 2 });
}

#[test]
fn run_wrapper_reports_context() {
    init_logger();
    let ok = crate::run(
        vec![
            inst("movn", vec![dev(STDOUT), imm(7)]),
            inst("hlt", vec![]),
        ],
        MemoryController::default(),
        Config::default(),
    )
    .unwrap();
    assert_eq!(ok.memory().stdout(), "7");

    let err = crate::run(
        vec![inst("mov", vec![imm(1), imm(2)])],
        MemoryController::default(),
        Config::default(),
    )
    .unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("program faulted at 0"), "{message}");
    assert!(message.contains("not writeable"), "{message}");
}
