use proptest::prelude::*;
use strata::{
    ColumnDef, ConstraintCall, IndexKind, Instruction, SchemaRegistry, TypeTag, apply, apply_all,
    dump, fingerprint,
};

fn arb_instruction(table: &'static str) -> impl Strategy<Value = Instruction> {
    let column = prop::sample::select(vec!["a", "b", "c"]);
    prop_oneof![
        (column.clone(), any::<bool>()).prop_map(move |(c, nullable)| {
            let def = ColumnDef::new(table, c, TypeTag::Integer);
            if nullable {
                def.with(ConstraintCall::nullable()).add()
            } else {
                def.add()
            }
        }),
        (column.clone(), 1..=255i64).prop_map(move |(c, len)| {
            ColumnDef::new(table, c, TypeTag::String).arg(len).change()
        }),
        column
            .clone()
            .prop_map(move |c| Instruction::drop_columns(table, &[c])),
        (column.clone(), column.clone())
            .prop_map(move |(from, to)| Instruction::rename_column(table, from, to)),
        column
            .clone()
            .prop_map(move |c| Instruction::add_index(table, IndexKind::Index, &[c])),
        column.prop_map(move |c| Instruction::drop_index(table, IndexKind::Index, &[c])),
    ]
}

/// Keep only the instructions that apply cleanly in sequence.
fn valid_stream(instructions: Vec<Instruction>) -> Vec<Instruction> {
    let mut registry = SchemaRegistry::new();
    instructions
        .into_iter()
        .filter(|i| apply(&mut registry, i).is_ok())
        .collect()
}

fn interleave(a: &[Instruction], b: &[Instruction], mask: &[bool]) -> Vec<Instruction> {
    let (mut a, mut b) = (a.iter(), b.iter());
    let mut out = Vec::new();
    for &take_a in mask {
        let next = if take_a { a.next() } else { b.next() };
        out.extend(next.cloned());
    }
    out.extend(a.cloned());
    out.extend(b.cloned());
    out
}

proptest! {
    #[test]
    fn prop_disjoint_tables_commute(
        users in prop::collection::vec(arb_instruction("users"), 0..24),
        posts in prop::collection::vec(arb_instruction("posts"), 0..24),
        mask in prop::collection::vec(any::<bool>(), 0..48),
    ) {
        let users = valid_stream(users);
        let posts = valid_stream(posts);

        let sequential: Vec<_> = users.iter().chain(posts.iter()).cloned().collect();
        let mixed = interleave(&users, &posts, &mask);

        let expected = apply_all(SchemaRegistry::new(), &sequential).unwrap();
        let actual = apply_all(SchemaRegistry::new(), &mixed).unwrap();
        prop_assert_eq!(&actual, &expected);
        prop_assert_eq!(fingerprint(&actual), fingerprint(&expected));
    }

    #[test]
    fn prop_apply_all_is_a_fold(
        instructions in prop::collection::vec(arb_instruction("t"), 0..32),
    ) {
        let mut folded = SchemaRegistry::new();
        let mut failed = false;
        for instruction in &instructions {
            if apply(&mut folded, instruction).is_err() {
                failed = true;
                break;
            }
        }

        match apply_all(SchemaRegistry::new(), &instructions) {
            Ok(registry) => {
                prop_assert!(!failed);
                prop_assert_eq!(registry, folded);
            }
            Err(_) => prop_assert!(failed),
        }
    }

    #[test]
    fn prop_dump_is_stable(
        instructions in prop::collection::vec(arb_instruction("t"), 0..32),
    ) {
        let registry = apply_all(SchemaRegistry::new(), &valid_stream(instructions)).unwrap();
        prop_assert_eq!(dump(&registry), dump(&registry.clone()));
        prop_assert_eq!(fingerprint(&registry), fingerprint(&registry));
    }
}
