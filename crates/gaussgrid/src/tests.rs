use std::io::ErrorKind;

use approx::assert_abs_diff_eq;
use insta::assert_snapshot;
use test_case::test_case;

use super::*;

fn mol(atoms: &[(&str, f64, f64, f64)]) -> Molecule {
    atoms
        .iter()
        .map(|&(e, x, y, z)| Atom::new(e, x, y, z))
        .collect::<Vec<_>>()
        .into()
}

#[test]
fn two_segments() {
    let got = parse([
        "C 0.0 0.0 0.0",
        "H 1.0 0.0 0.0",
        "--Link1--",
        "O 0.0 0.0 0.0",
    ])
    .unwrap();
    let want = MoleculeSet::from(vec![
        mol(&[("C", 0.0, 0.0, 0.0), ("H", 1.0, 0.0, 0.0)]),
        mol(&[("O", 0.0, 0.0, 0.0)]),
    ]);
    assert_eq!(got, want);
}

#[test]
fn only_boundaries() {
    let got = parse(["--Link1--", "--Link1--"]).unwrap();
    assert_eq!(got.len(), 2);
    assert!(got.iter().all(Molecule::is_empty));
}

#[test]
fn leading_garbage() {
    let got = parse(["garbage", "N -1.5 2.25 0.0"]).unwrap();
    assert_eq!(got.len(), 1);
    assert_abs_diff_eq!(
        got.molecules()[0].atoms[0],
        Atom::new("N", -1.5, 2.25, 0.0)
    );
}

#[test_case(0; "none")]
#[test_case(1; "one")]
#[test_case(5; "five")]
fn boundary_count(n: usize) {
    let lines = vec![BOUNDARY; n];
    let got = parse(&lines).unwrap();
    assert_eq!(got.len(), n);
    assert_eq!(got.atom_count(), 0);
}

#[test]
fn no_boundary() {
    let got = parse(["He 0 0 0", "Ne 1 1 1"]).unwrap();
    assert_eq!(got.len(), 1);
    assert_eq!(got.molecules()[0].len(), 2);
}

#[test]
fn consecutive_boundaries() {
    let got = parse([
        "H 0 0 0",
        "--Link1--",
        "--Link1--",
        "--Link1--",
        "H 0 0 1",
    ])
    .unwrap();
    let lens: Vec<_> = got.iter().map(Molecule::len).collect();
    assert_eq!(lens, vec![1, 0, 0, 1]);
}

#[test]
fn trailing_boundary() {
    let got = parse(["H 0 0 0", "--Link1--"]).unwrap();
    assert_eq!(got.len(), 1);
    assert_eq!(got.molecules()[0].len(), 1);

    let got = parse(["H 0 0 0", "--Link1--", "H 0 0 1"]).unwrap();
    assert_eq!(got.len(), 2);
    assert_eq!(got.molecules()[1].atoms[0].z, 1.0);
}

#[test]
fn indented_boundary_is_ignored() {
    let got = parse(["H 0 0 0", "  --Link1--", "H 0 0 1"]).unwrap();
    assert_eq!(got.len(), 1);
    assert_eq!(got.molecules()[0].len(), 2);
}

#[test]
fn order() {
    let got = parse(["C 1 0 0", "B 2 0 0", "A 3 0 0"]).unwrap();
    let elements: Vec<_> =
        got.molecules()[0].iter().map(|a| a.element.as_str()).collect();
    assert_eq!(elements, vec!["C", "B", "A"]);
    let xs: Vec<_> = got.molecules()[0].iter().map(|a| a.x).collect();
    assert_eq!(xs, vec![1.0, 2.0, 3.0]);
}

#[test]
fn ignored_lines() {
    let clean = [
        "O 0.0 0.0 0.117790",
        "H 0.0 0.755453 -0.471161",
        "--Link1--",
        "H 0.0 0.0 0.0",
    ];
    let noisy = [
        " Entering Gaussian System, Link 0=g16",
        "",
        "O 0.0 0.0 0.117790",
        "   ",
        "#p opt",
        "H 0.0 0.755453 -0.471161",
        "0 1",
        "--Link1--",
        "Symbolic Z-matrix:",
        "H 0.0 0.0 0.0",
        " Normal termination of Gaussian 16",
    ];
    assert_eq!(parse(clean).unwrap(), parse(noisy).unwrap());
}

#[test_case("H 0 0 0 0"; "extra field")]
#[test_case("H 0 0"; "missing field")]
#[test_case("Hyd 0 0 0"; "long element")]
#[test_case("1 0 0 0"; "numeric element")]
#[test_case("H 1e-5 0 0"; "exponent")]
#[test_case("H +1.0 0 0"; "plus sign")]
#[test_case("H nan 0 0"; "nan")]
#[test_case("Link1-- 0 0 0"; "no separator prefix")]
#[test_case("  --Link1--"; "indented separator")]
fn not_an_atom(line: &str) {
    assert_eq!(Line::classify(line, 1).unwrap(), Line::Other);
}

#[test_case("C 0.0 0.0 0.0", Atom::new("C", 0.0, 0.0, 0.0); "plain")]
#[test_case("  Cl  -1.0   .5  7.  ", Atom::new("Cl", -1.0, 0.5, 7.0); "padded")]
#[test_case("h -.25 -0 10\r", Atom::new("h", -0.25, 0.0, 10.0); "crlf")]
#[test_case("Xx 1 2 3", Atom::new("Xx", 1.0, 2.0, 3.0); "fake element")]
fn atom_line(line: &str, want: Atom) {
    let Line::Atom(got) = Line::classify(line, 1).unwrap() else {
        panic!("expected an atom from {line:?}");
    };
    assert_abs_diff_eq!(got, want);
}

#[test_case("--Link1--"; "bare")]
#[test_case("--Link1-- restart"; "trailing text")]
fn boundary_line(line: &str) {
    assert_eq!(Line::classify(line, 1).unwrap(), Line::Boundary);
}

#[test_case("C 1.2.3 0 0"; "two dots")]
#[test_case("C 5- 0 0"; "trailing sign")]
#[test_case("C 0 -- 0"; "two signs")]
#[test_case("C 0 0 ."; "lone dot")]
#[test_case("C - 0 0"; "lone sign")]
fn malformed(line: &str) {
    let got = parse(["H 0 0 0", "comment", line, "--Link1--"]);
    assert_eq!(
        got,
        Err(ParseError::MalformedCoordinate {
            line_number: 3,
            line: line.to_owned(),
        })
    );
}

#[test]
fn malformed_file() {
    let err = MoleculeSet::load("testfiles/malformed.gjf").unwrap_err();
    assert!(err.is_malformed_coordinate());
    assert_snapshot!(
        err,
        @"malformed coordinate on line 7: ` H    1.0.89000   0.000000    0.000000`"
    );
}

#[test]
fn missing_file() {
    let got = MoleculeSet::load("testfiles/does_not_exist.gjf");
    assert_eq!(
        got,
        Err(ParseError::FileUnreadable {
            path: "testfiles/does_not_exist.gjf".to_owned(),
            kind: ErrorKind::NotFound,
        })
    );
}

#[test]
fn load() {
    let got = MoleculeSet::load("testfiles/water_clusters.gjf").unwrap();
    let lens: Vec<_> = got.iter().map(Molecule::len).collect();
    assert_eq!(lens, vec![3, 6, 4]);
    assert_eq!(got.atom_count(), 13);
    assert_abs_diff_eq!(
        got.molecules()[1].atoms[4],
        Atom::new("H", 1.680398, -0.373741, -0.758561)
    );
    assert_eq!(got.grid().side(), 2);
}

#[test]
fn from_str() {
    let got: MoleculeSet = "C 0 0 0\n--Link1--\n\nO 0 0 1\n".parse().unwrap();
    assert_eq!(got.len(), 2);
}

#[test]
fn display() {
    let got: MoleculeSet =
        "C 0.0 0.0 0.0\nH 1.0 0.0 0.0\n--Link1--\nO 0.0 0.0 0.0"
            .parse()
            .unwrap();
    assert_snapshot!(got, @r"
    Cluster 1
    C     0.0000000000    0.0000000000    0.0000000000
    H     1.0000000000    0.0000000000    0.0000000000
    Cluster 2
    O     0.0000000000    0.0000000000    0.0000000000
    ");
}

#[test]
fn json() {
    let got = parse(["garbage", "N -1.5 2.25 0.0", "--Link1--"]).unwrap();
    assert_eq!(
        serde_json::to_string(&got).unwrap(),
        r#"[[{"element":"N","x":-1.5,"y":2.25,"z":0.0}]]"#
    );
    let back: MoleculeSet =
        serde_json::from_str(r#"[[], [{"element":"C","x":1,"y":2,"z":3}]]"#)
            .unwrap();
    assert_eq!(back.len(), 2);
    assert_eq!(back.molecules()[1].atoms[0], Atom::new("C", 1.0, 2.0, 3.0));
}

#[test]
fn centroid_and_bounds() {
    let m = mol(&[("H", 0.0, -1.0, 2.0), ("H", 2.0, 1.0, 2.0)]);
    assert_eq!(m.centroid(), Some([1.0, 0.0, 2.0]));
    assert_eq!(m.bounds(), Some([(0.0, 2.0), (-1.0, 1.0), (2.0, 2.0)]));
    assert_eq!(Molecule::default().centroid(), None);
    assert_eq!(Molecule::default().bounds(), None);
}

#[test_case(0, 0)]
#[test_case(1, 1)]
#[test_case(2, 2)]
#[test_case(4, 2)]
#[test_case(5, 3)]
#[test_case(9, 3)]
#[test_case(10, 4)]
#[test_case(1_000_000, 1000)]
#[test_case(1_000_001, 1001)]
fn side(count: usize, want: usize) {
    assert_eq!(grid_side(count), want);
}

#[test]
fn grid_cells() {
    let grid = Grid::new(5);
    assert_eq!(grid.side(), 3);
    assert_eq!(grid.cell(0), Some((0, 0)));
    assert_eq!(grid.cell(2), Some((0, 2)));
    assert_eq!(grid.cell(4), Some((1, 1)));
    assert_eq!(grid.cell(5), None);

    let cells: Vec<_> = grid.cells().collect();
    assert_eq!(cells.len(), 9);
    assert_eq!(cells[3], (1, 0, Some(3)));
    assert_eq!(cells[5], (1, 2, None));
    assert_eq!(cells.iter().filter(|c| c.2.is_some()).count(), 5);
}

#[test]
fn huge_grid() {
    let grid = Grid::new(usize::MAX);
    #[cfg(target_pointer_width = "64")]
    assert_eq!(grid.side(), 1 << 32);
    let first: Vec<_> = grid.cells().take(2).collect();
    assert_eq!(first, vec![(0, 0, Some(0)), (0, 1, Some(1))]);
    let side = grid.side();
    assert_eq!(grid.cell(side + 1), Some((1, 1)));
}

#[test]
fn empty_grid() {
    let grid = Grid::new(0);
    assert!(grid.is_empty());
    assert_eq!(grid.side(), 0);
    assert_eq!(grid.cell(0), None);
    assert_eq!(grid.cells().count(), 0);
}
