//! End-to-end conversion tests (value -> grid -> value, and through a sheet)

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sheetbridge::prelude::*;
use sheetbridge::{Cell, Label, NumberMode};

fn n(v: f64) -> Scalar {
    Scalar::Number(v)
}

fn t(s: &str) -> Scalar {
    Scalar::from(s)
}

/// A 2x3 table exercising every header/index depth combination.
fn sample_table(h: usize, i: usize) -> Table {
    let col_labels: Vec<Label> = match h {
        0 => (0..3i64).map(|c| vec![Scalar::Int(c)]).collect(),
        1 => ["c0", "c1", "c2"].iter().map(|c| vec![t(c)]).collect(),
        _ => vec![
            vec![t("a"), t("c0")],
            vec![t("a"), t("c1")],
            vec![t("b"), t("c2")],
        ],
    };
    let row_labels: Vec<Label> = match i {
        0 => (0..2i64).map(|r| vec![Scalar::Int(r)]).collect(),
        1 => vec![vec![n(1.0)], vec![n(2.0)]],
        _ => vec![vec![n(1.0), t("x")], vec![n(2.0), t("y")]],
    };
    let index_names = if i == 0 || h == 0 {
        vec![None; i.max(1)]
    } else if h == 1 {
        if i == 1 {
            vec![Some("id".to_string())]
        } else {
            vec![None; i]
        }
    } else {
        [Some("id".to_string()), Some("sub".to_string())][..i].to_vec()
    };
    Table {
        body: vec![vec![n(10.0), n(20.0), n(30.0)], vec![n(40.0), n(50.0), n(60.0)]],
        col_labels,
        row_labels,
        index_names,
        col_names: vec![None; h.max(1)],
    }
}

#[test]
fn mapping_roundtrip() {
    let grid = Grid::from_rows(vec![
        vec![Cell::from("a"), Cell::from(1.0)],
        vec![Cell::from("b"), Cell::from(2.0)],
    ]);
    let opts = ConvertOptions::new();
    let value = read(TargetKind::Map, &grid, &opts).unwrap();
    assert_eq!(
        value,
        Value::Map(vec![(t("a"), n(1.0)), (t("b"), n(2.0))])
    );
    assert_eq!(value.map_get(&t("a")), Some(&n(1.0)));

    let written = write(&value, &opts).unwrap();
    assert_eq!(written, grid);
}

#[test]
fn hierarchical_table_read() {
    let grid = Grid::from_rows(vec![
        vec![
            Cell::Empty,
            Cell::from("a"),
            Cell::from("a"),
            Cell::from("b"),
        ],
        vec![
            Cell::from("ix1"),
            Cell::from("c"),
            Cell::from("d"),
            Cell::from("c"),
        ],
        vec![
            Cell::from(1.0),
            Cell::from(1.0),
            Cell::from(2.0),
            Cell::from(3.0),
        ],
        vec![
            Cell::from(2.0),
            Cell::from(4.0),
            Cell::from(5.0),
            Cell::from(6.0),
        ],
    ]);
    let opts = ConvertOptions::new().with_header_depth(2).with_index_depth(1);
    let value = read(TargetKind::Table, &grid, &opts).unwrap();
    let table = value.as_table().unwrap();

    assert_eq!(
        table.col_labels,
        vec![
            vec![t("a"), t("c")],
            vec![t("a"), t("d")],
            vec![t("b"), t("c")],
        ]
    );
    assert_eq!(table.index_names, vec![Some("ix1".to_string())]);
    assert_eq!(table.row_labels, vec![vec![n(1.0)], vec![n(2.0)]]);
    assert_eq!(
        table.body,
        vec![vec![n(1.0), n(2.0), n(3.0)], vec![n(4.0), n(5.0), n(6.0)]]
    );

    // And the inverse reproduces the grid
    assert_eq!(write(&value, &opts).unwrap(), grid);
}

#[test]
fn tables_roundtrip_across_header_and_index_depths() {
    for h in 0..=2usize {
        for i in 0..=2usize {
            let table = sample_table(h, i);
            let opts = ConvertOptions::new()
                .with_header_depth(h)
                .with_index_depth(i);
            let grid = write(&Value::Table(table.clone()), &opts).unwrap();
            let back = read(TargetKind::Table, &grid, &opts).unwrap();
            assert_eq!(back, Value::Table(table), "header={h} index={i}");
        }
    }
}

#[test]
fn tables_roundtrip_through_a_sheet() {
    let table = sample_table(2, 1);
    let opts = ConvertOptions::new().with_header_depth(2).with_index_depth(1);
    let mut sheet = MemorySheet::new();
    let rect = write_to(&Value::Table(table.clone()), &mut sheet, (3, 2), &opts).unwrap();

    let back = read(TargetKind::Table, &sheet.read_rect(&rect), &opts).unwrap();
    assert_eq!(back, Value::Table(table));
}

#[test]
fn integer_coercion_both_ways() {
    // Writing an integer widens it to a float cell
    let grid = write(&Value::Scalar(Scalar::Int(3)), &ConvertOptions::new()).unwrap();
    assert_eq!(grid, Grid::single(Cell::Number(3.0)));

    // Reading stays float unless integer coercion is requested
    let float_opts = ConvertOptions::new();
    assert_eq!(
        read(TargetKind::Scalar, &grid, &float_opts).unwrap(),
        Value::Scalar(n(3.0))
    );
    let int_opts = ConvertOptions::new().with_numbers(NumberMode::Int);
    assert_eq!(
        read(TargetKind::Scalar, &grid, &int_opts).unwrap(),
        Value::Scalar(Scalar::Int(3))
    );
}

#[test]
fn empty_body_cells_always_read_as_missing_token() {
    // The neighboring contents vary; the empty cell's reading never does
    for neighbor in [Cell::from(1.0), Cell::from("x"), Cell::Bool(true)] {
        let grid = Grid::from_rows(vec![
            vec![Cell::from("k"), Cell::from("v")],
            vec![Cell::from(1.0), Cell::Empty],
            vec![Cell::from(2.0), neighbor],
        ]);
        let value = read(TargetKind::Table, &grid, &ConvertOptions::new()).unwrap();
        assert_eq!(value.as_table().unwrap().body[0][0], Scalar::None);

        let custom = ConvertOptions::new().with_missing(t("N/A"));
        let value = read(TargetKind::Table, &grid, &custom).unwrap();
        assert_eq!(value.as_table().unwrap().body[0][0], t("N/A"));
    }
}

#[test]
fn transpose_roundtrips() {
    let opts = ConvertOptions::new().with_transpose(true);
    let value = Value::List(vec![n(1.0), n(2.0), n(3.0)]);
    let grid = write(&value, &opts).unwrap();
    assert_eq!((grid.height(), grid.width()), (3, 1));
    assert_eq!(read(TargetKind::List, &grid, &opts).unwrap(), value);
}

#[test]
fn datetime_cells_roundtrip() {
    let dt = chrono::NaiveDate::from_ymd_opt(2021, 3, 14)
        .unwrap()
        .and_hms_opt(9, 26, 53)
        .unwrap();
    let value = Value::Scalar(Scalar::DateTime(dt));
    let grid = write(&value, &ConvertOptions::new()).unwrap();
    assert_eq!(
        read(TargetKind::Scalar, &grid, &ConvertOptions::new()).unwrap(),
        value
    );
}

proptest! {
    #[test]
    fn finite_matrices_roundtrip(
        (height, width, values) in (1usize..5, 1usize..5).prop_flat_map(|(h, w)| {
            (
                Just(h),
                Just(w),
                proptest::collection::vec(-1e9f64..1e9, h * w),
            )
        })
    ) {
        let rows: Vec<Vec<Scalar>> = (0..height)
            .map(|r| (0..width).map(|c| n(values[r * width + c])).collect())
            .collect();
        let value = Value::Matrix(rows);
        let opts = ConvertOptions::new().with_ndim(Ndim::Two);
        let grid = write(&value, &opts).unwrap();
        let back = read(TargetKind::List, &grid, &opts).unwrap();
        prop_assert_eq!(back, value);
    }

    #[test]
    fn mappings_with_unique_keys_roundtrip(
        keys in proptest::collection::btree_set("[a-z]{1,6}", 1..8),
    ) {
        let pairs: Vec<(Scalar, Scalar)> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (t(k), n(i as f64)))
            .collect();
        let value = Value::Map(pairs);
        let opts = ConvertOptions::new();
        let grid = write(&value, &opts).unwrap();
        prop_assert_eq!(read(TargetKind::Map, &grid, &opts).unwrap(), value);
    }
}
