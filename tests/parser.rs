//! Integration tests for the parser.

use tpls::tp::ast::{
    AttributeValue, BranchingInstruction, Instruction, MotionOption, PositionData, Speed,
    SpeedUnit, Termination, WaitInstruction,
};
use tpls::{parse_instruction, parse_program};

const PROGRAM: &str = r#"/PROG  PICKPLACE
/ATTR
OWNER       = MNEDITOR;
COMMENT     = "pick and place demo";
PROG_SIZE   = 636;
CREATE      = DATE 18-04-12  TIME 09:33:56;
MODIFIED    = DATE 18-04-12  TIME 10:02:11;
LINE_COUNT  = 12;
MEMORY_SIZE = 980;
PROTECT     = READ_WRITE;
TCD:  STACK_SIZE = 0,
      TASK_PRIORITY = 50,
      TIME_SLICE = 0;
DEFAULT_GROUP = 1,*,*,*,*;
/APPL
  SPOT : TRUE ;
/MN
   1:  !pick cycle ;
   2:  UFRAME_NUM=1 ;
   3:  UTOOL_NUM=1 ;
   4:  J P[1:home] 100% FINE ;
   5:  LBL[1:cycle] ;
   6:  WAIT DI[1]=ON ;
   7:  L P[2] 2000mm/sec CNT100 Offset,PR[1] ;
   8:  DO[1]=ON ;
   9:  WAIT 0.5(sec) ;
  10:  R[1]=R[1]+1 ;
  11:  IF R[1]<10, JMP LBL[1] ;
  12:  END ;
/POS
P[1:"home"]{
   GP1:
    UF : 0, UT : 1,   CONFIG : 'N U T, 0, 0, 0',
    X = 0.0 mm, Y = 0.0 mm, Z = 1000.0 mm,
    W = 0.0 deg, P = 0.0 deg, R = 0.0 deg
};
P[2]{
   GP1:
    UF : 1, UT : 1,   CONFIG : 'N U T, 0, 0, 0',
    X = 450.5 mm, Y = -120.0 mm, Z = 85.0 mm,
    W = 180.0 deg, P = 0.0 deg, R = 45.0 deg
};
/END
"#;

#[test]
fn test_full_program_round_trip() {
    let program = parse_program(PROGRAM).expect("program should parse");

    assert_eq!(program.header.name, "PICKPLACE");
    assert_eq!(program.header.sub_type, None);
    assert_eq!(
        program.header.attribute("COMMENT"),
        Some(&AttributeValue::Str("pick and place demo".to_string()))
    );
    assert_eq!(
        program.header.attribute("PROG_SIZE"),
        Some(&AttributeValue::Integer(636))
    );
    assert!(matches!(
        program.header.attribute("PROTECT"),
        Some(AttributeValue::Raw(_))
    ));
    // The multi-line TCD record folds into one raw attribute.
    assert!(matches!(
        program.header.attribute("TCD"),
        Some(AttributeValue::Raw(_))
    ));
    let application = program.header.application.as_ref().expect("appl section");
    assert_eq!(application[0].key, "SPOT");
    assert_eq!(application[0].value, "TRUE");

    assert_eq!(program.instructions.len(), 12);
    // TP numbers come from the line prefixes, physical lines from the file.
    assert_eq!(program.instructions[0].number, 1);
    assert_eq!(program.instructions[0].line, 18);
    assert_eq!(
        program.instructions[0].instruction,
        Instruction::Comment("pick cycle".to_string())
    );
    assert!(matches!(
        program.instructions[3].instruction,
        Instruction::Motion(_)
    ));
    assert!(matches!(
        program.instructions[5].instruction,
        Instruction::Wait(WaitInstruction::Condition { .. })
    ));
    assert!(matches!(
        program.instructions[8].instruction,
        Instruction::Wait(WaitInstruction::Duration(_))
    ));
    assert!(matches!(
        program.instructions[11].instruction,
        Instruction::ProgramControl(_)
    ));

    match &program.instructions[6].instruction {
        Instruction::Motion(motion) => {
            assert_eq!(
                motion.speed,
                Speed::Literal {
                    value: 2000.0,
                    unit: SpeedUnit::MmPerSec
                }
            );
            assert_eq!(motion.termination, Termination::Cnt(100));
            assert!(matches!(motion.options[0], MotionOption::Offset(Some(_))));
        }
        other => panic!("expected motion, got {:?}", other),
    }

    assert_eq!(program.positions.len(), 2);
    let home = program.position(1).expect("P[1]");
    assert_eq!(home.comment.as_deref(), Some("home"));
    match &home.groups[0].data {
        PositionData::Cartesian { z, .. } => assert_eq!(*z, 1000.0),
        other => panic!("expected Cartesian, got {:?}", other),
    }
}

#[test]
fn test_parse_is_idempotent() {
    let first = parse_program(PROGRAM).expect("program should parse");
    let second = parse_program(PROGRAM).expect("program should parse");
    assert_eq!(first, second);
}

#[test]
fn test_parallel_parses_share_nothing() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| parse_program(PROGRAM).expect("program should parse")))
        .collect();
    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("no panic"))
        .collect();
    for result in &results[1..] {
        assert_eq!(result, &results[0]);
    }
}

#[test]
fn test_continuation_lines_join_before_parsing() {
    let source = "/PROG  CONT\n/MN\n   1:  IF (DI[1] AND DI[2]\n  :  AND DI[3]), JMP LBL[1] ;\n   2:  LBL[1] ;\n/END\n";
    let program = parse_program(source).expect("program should parse");
    assert_eq!(program.instructions.len(), 2);
    assert!(matches!(
        program.instructions[0].instruction,
        Instruction::Branching(BranchingInstruction::If { .. })
    ));
    // The placeholder keeps physical numbering for the lines after it.
    assert_eq!(program.instructions[1].line, 5);
}

#[test]
fn test_single_malformed_line_fails_the_program() {
    let source = "/PROG  BAD\n/MN\n   1:  J P[1] 100% FINE ;\n   2:  SELECT ;\n/END\n";
    let error = parse_program(source).expect_err("parse should fail");
    assert_eq!(error.line, 4);
    assert!(error.column > 7);
}

#[test]
fn test_error_position_points_into_the_line() {
    let source = "/PROG  BAD\n/MN\n   1:  L P[1] 100% ;\n/END\n";
    // Missing termination: the furthest failure is inside line 3.
    let error = parse_program(source).expect_err("parse should fail");
    assert_eq!(error.line, 3);
}

#[test]
fn test_missing_markers_are_reported() {
    assert!(parse_program("").is_err());
    assert!(parse_program("/PROG  X\n/MN\n").is_err());
    assert!(parse_program("/MN\n/END\n").is_err());
}

#[test]
fn test_program_subtype_word() {
    let source = "/PROG  GRIP  Macro\n/MN\n   1:  DO[1]=ON ;\n/END\n";
    let program = parse_program(source).expect("program should parse");
    assert_eq!(program.header.sub_type.as_deref(), Some("Macro"));
}

#[test]
fn test_parse_instruction_entry_point() {
    let parsed = parse_instruction("  1:  J P[1] 100% FINE ;").expect("line should parse");
    assert_eq!(parsed.number, 1);
    assert!(matches!(parsed.instruction, Instruction::Motion(_)));

    let error = parse_instruction("  1:  J P[1] ;").expect_err("missing speed");
    assert_eq!(error.line, 1);
}

#[test]
fn test_empty_main_section_parses() {
    let program = parse_program("/PROG  EMPTY\n/MN\n/END\n").expect("program should parse");
    assert!(program.instructions.is_empty());
    assert!(program.positions.is_empty());
}
