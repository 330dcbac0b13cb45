//! Reference scenarios for the public API

use lasr_matrix::{
    append_cols, det, eig, hconcat, insert_rows, inverse, lstsqr, mtimes, svd, transpose, vconcat,
    Extractor, Matrix,
};
use lasr_matrix::Extractor::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn grid() -> Matrix {
    let rows: Vec<Vec<f64>> = (0..4)
        .map(|i| (0..5).map(|j| (i * 5 + j) as f64).collect())
        .collect();
    Matrix::from_rows(rows).unwrap()
}

#[test]
fn slicing_scenarios() {
    let m = grid();
    assert_eq!(
        m.slice(&Take(3), &DropLast(2)).unwrap(),
        Matrix::from([[0.0, 1.0, 2.0], [5.0, 6.0, 7.0], [10.0, 11.0, 12.0]])
    );
    assert_eq!(
        m.slice(&PosCyc(vec![-7, 80]), &Range(4, -2, 0)).unwrap(),
        Matrix::from([[9.0, 7.0, 5.0], [4.0, 2.0, 0.0]])
    );
    assert!(m.slice(&Extractor::Take(5), &All).is_err());
}

#[test]
fn inverse_round_trip() {
    init_tracing();
    let a = Matrix::from([[1.0, 0.0, 2.0], [-1.0, 5.0, 0.0], [0.0, 3.0, -9.0]]);
    let id = mtimes(&inverse(&a).unwrap(), &a).unwrap();
    assert!(id.approx_eq(&lasr_matrix::eye(3, 3), 1e-12));
    assert_eq!(transpose(&transpose(&a)), a);
}

#[test]
fn decompositions_reconstruct() {
    init_tracing();
    let a = Matrix::from([[2.0, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 4.0]]);
    let (v, d) = eig(&a).unwrap();
    assert!(mtimes(&a, &v).unwrap().approx_eq(&mtimes(&v, &d).unwrap(), 1e-12));

    let (u, s, v) = svd(&a).unwrap();
    let back = mtimes(&mtimes(&u, &s).unwrap(), &transpose(&v)).unwrap();
    assert!(back.approx_eq(&a, 1e-12));
}

#[test]
fn determinant_reference() {
    let a = Matrix::from([
        [1.44, -7.84, -4.39, 4.53],
        [-9.96, -0.28, -3.24, 3.83],
        [-7.55, 3.24, 6.27, -6.64],
        [8.34, 8.09, 5.28, 2.06],
    ]);
    assert!((det(&a).unwrap() + 4044.7754).abs() < 1e-3);
}

#[test]
fn least_squares_reference() {
    init_tracing();
    let a = Matrix::from([
        [1.44, -7.84, -4.39, 4.53],
        [-9.96, -0.28, -3.24, 3.83],
        [-7.55, 3.24, 6.27, -6.64],
        [8.34, 8.09, 5.28, 2.06],
        [7.08, 2.52, 0.74, -2.47],
        [-5.45, -5.70, -1.19, 4.70],
    ]);
    let b = Matrix::from([
        [8.58, 9.35],
        [8.26, -4.43],
        [8.48, -0.70],
        [-5.28, -0.26],
        [5.72, -7.36],
        [8.93, -2.52],
    ]);
    let (x, r) = lstsqr(&a, &b).unwrap();
    let expected = Matrix::from([
        [-0.4506, 0.2497],
        [-0.8491, -0.9020],
        [0.7066, 0.6323],
        [0.1288, 0.1351],
    ]);
    assert!(x.approx_eq(&expected, 1e-3));
    assert!(r.approx_eq(&Matrix::from([[195.3616, 107.05746]]), 1e-3));
}

#[test]
fn insertion_keeps_surrounding_rows() {
    let m = grid();
    let block = Matrix::new(2, 5, -1.0);
    let out = insert_rows(&m, &block, 1).unwrap();
    assert_eq!(out.shape(), (6, 5));
    assert_eq!(out.row(0), m.row(0));
    assert_eq!(out.row(1), block.row(0));
    assert_eq!(out.row(2), block.row(1));
    for i in 1..4 {
        assert_eq!(out.row(i + 2), m.row(i));
    }
}

#[test]
fn concatenation_directions() {
    let a = Matrix::from([[1.0, 2.0]]);
    let b = Matrix::from([[3.0, 4.0]]);
    // hconcat stacks rows, vconcat places side by side
    assert_eq!(hconcat(&a, &b).unwrap(), Matrix::from([[1.0, 2.0], [3.0, 4.0]]));
    assert_eq!(vconcat(&a, &b).unwrap(), Matrix::from([[1.0, 2.0, 3.0, 4.0]]));
    assert_eq!(append_cols(&a, 9.0).unwrap(), Matrix::from([[1.0, 2.0, 9.0]]));
}

#[test]
fn matrix_serde_round_trip() {
    let m = Matrix::from([[1.0, 2.0], [3.0, 4.0]]);
    let json = serde_json::to_string(&m).unwrap();
    let back: Matrix = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);
}
