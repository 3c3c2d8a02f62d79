use approx::assert_relative_eq;
use multi_array::{
    add, dot, linspace, math, outer, size, sum, Array, ArrayError, Subscript,
};
use num_complex::Complex64;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn make_array(rows: usize, cols: usize) -> Array<f64, 2> {
    Array::from_shape_fn([rows, cols], |[i, j]| (i * cols + j) as f64)
}

fn random_shape<const N: usize>(rng: &mut StdRng) -> [usize; N] {
    let mut shape = [0usize; N];
    for d in shape.iter_mut() {
        *d = rng.gen_range(1..5);
    }
    shape
}

#[test]
fn test_size_matches_constructed_array() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let shape: [usize; 3] = random_shape(&mut rng);
        let a: Array<i32, 3> = Array::zeros(shape);
        assert_eq!(a.size(), size(&shape));
        assert_eq!(a.to_vec().len(), size(&shape));

        let wrong = vec![0; size(&shape) + 1];
        assert_eq!(
            Array::from_vec(shape, wrong).unwrap_err(),
            ArrayError::ShapeMismatch(shape.to_vec(), vec![size(&shape) + 1])
        );
    }
}

#[test]
fn test_read_after_write_every_index() {
    let mut rng = StdRng::seed_from_u64(42);
    let shape: [usize; 4] = random_shape(&mut rng);
    let mut a: Array<f64, 4> = Array::zeros(shape);
    let mut written = Vec::new();
    for (idx, _) in a.to_owned().indexed_iter() {
        let value: f64 = rng.gen();
        a[idx] = value;
        written.push((idx, value));
    }
    for (idx, value) in written {
        assert_eq!(a[idx], value);
        assert_eq!(*a.get(idx).unwrap(), value);
    }
}

#[test]
fn test_out_of_range_index() {
    let a = make_array(2, 3);
    assert_eq!(
        a.get([1, 3]).unwrap_err(),
        ArrayError::IndexOverflow {
            axis: 1,
            index: 3,
            extent: 3
        }
    );
}

#[test]
#[should_panic(expected = "index overflow")]
fn test_index_operator_panics() {
    let a = make_array(2, 3);
    let _ = a[[2, 0]];
}

#[test]
fn test_reshape_preserves_flat_order() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..10 {
        let shape: [usize; 2] = random_shape(&mut rng);
        let a = Array::from_shape_fn(shape, |[i, j]| i * 100 + j);
        let flat = a.to_vec();
        let b = a.reshape([size(&shape), 1]).unwrap();
        assert_eq!(b.to_vec(), flat);
        let c = b.into_shape([size(&shape)]).unwrap();
        assert_eq!(c.to_vec(), flat);
    }
    let a = make_array(2, 3);
    assert_eq!(
        a.reshape([4, 2]).unwrap_err(),
        ArrayError::ShapeMismatch(vec![2, 3], vec![4, 2])
    );
}

#[test]
fn test_copy_is_independent() {
    let a = make_array(3, 3);
    let mut b = a.to_owned();
    assert_eq!(b.to_vec(), a.to_vec());
    b[[0, 0]] = -1.0;
    assert_eq!(a[[0, 0]], 0.0);
}

#[test]
fn test_copy_of_view_is_independent() {
    let a = make_array(3, 3);
    let row = a.at(1).unwrap();
    let mut copy = row.to_owned();
    assert_eq!(copy, row);
    copy[[0]] = -1.0;
    copy.fill(9.0);
    assert_eq!(a.to_vec(), make_array(3, 3).to_vec());
    assert_eq!(row.to_vec(), vec![3.0, 4.0, 5.0]);

    let col = a.index_axis(1, 2).unwrap();
    let mut col_copy = col.to_owned();
    col_copy *= 10.0;
    assert_eq!(col_copy.to_vec(), vec![20.0, 50.0, 80.0]);
    assert_eq!(col.to_vec(), vec![2.0, 5.0, 8.0]);
}

#[test]
fn test_elementwise_add_and_scale() {
    let a: Array<i32, 1> = Array::from([1, 2, 3]);
    let b: Array<i32, 1> = Array::from([10, 20, 30]);
    assert_eq!((&a + &b).to_vec(), vec![11, 22, 33]);
    assert_eq!((&a * 3).to_vec(), vec![3, 6, 9]);
    assert_eq!(&a * 3, 3i32 * &a);

    let c = Array::from_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
    let d = Array::from_vec([4, 1], vec![1, 2, 3, 4]).unwrap();
    assert_eq!(
        add(&c, &d.reshape([2, 2]).unwrap()).unwrap().to_vec(),
        vec![2, 4, 6, 8]
    );
    assert!(matches!(
        add(&c, &Array::from_vec([1, 4], vec![0; 4]).unwrap()),
        Err(ArrayError::ShapeMismatch(_, _))
    ));
}

#[test]
fn test_linspace_matches_integers() {
    let a = linspace(1.0, 5.0, 5, true).unwrap();
    assert_eq!(a.to_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    let b = linspace(1.0, 5.0, 5, false).unwrap();
    assert_eq!(b.size(), 5);
    assert_eq!(b[[0]], 1.0);
    assert!(b.iter().all(|&x| x < 5.0));
}

#[test]
fn test_math_against_scalar() {
    let mut rng = StdRng::seed_from_u64(11);
    let a = Array::from_shape_fn([4, 5], |_| rng.gen_range(0.1_f64..10.0));
    let e = math::exp(&a);
    let s = math::sqrt(&a);
    for (idx, &x) in a.indexed_iter() {
        assert_relative_eq!(e[idx], x.exp(), epsilon = 1e-12);
        assert_relative_eq!(s[idx] * s[idx], x, epsilon = 1e-10);
    }
}

#[test]
fn test_dot_sum_outer() {
    let a = make_array(1, 4).into_shape([4]).unwrap();
    assert_relative_eq!(dot(&a, &a).unwrap(), 14.0);
    assert_relative_eq!(sum(&make_array(3, 3)), 36.0);
    let m: Array<f64, 2> = outer(&a, &a).unwrap();
    assert_eq!(m.shape(), &[4, 4]);
    assert_relative_eq!(m[[2, 3]], 6.0);
}

#[test]
fn test_complex_elements() {
    let a = Array::from_vec(
        [2],
        vec![Complex64::new(1.0, 2.0), Complex64::new(-1.0, 0.5)],
    )
    .unwrap();
    let b = &a * &a;
    assert_eq!(b[[0]], Complex64::new(-3.0, 4.0));
    let conj_dot = dot(&a.map(|z| z.conj()), &a).unwrap();
    assert_relative_eq!(conj_dot.re, 6.25);
    assert_relative_eq!(conj_dot.im, 0.0);
}

#[test]
fn test_subscript_chain_on_owned() {
    let a = Array::from_shape_fn([3, 4, 5], |[i, j, k]| i * 100 + j * 10 + k);
    let x = a.at(2).unwrap().subscript(3).unwrap().subscript(4).unwrap();
    assert_eq!(*x, 234);
}

#[test]
fn test_cast_truncates() {
    let a = Array::from_vec([3], vec![1.9, -2.7, 3.0]).unwrap();
    let b: Array<i32, 1> = a.cast();
    assert_eq!(b.to_vec(), vec![1, -2, 3]);
}

#[test]
fn test_nested_construction() {
    let a = Array::<i32, 2>::try_from(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    assert_eq!(a.to_string(), "[[1, 2, 3],\n [4, 5, 6]]");
    assert!(matches!(
        Array::<i32, 2>::try_from(vec![vec![1], vec![2, 3]]),
        Err(ArrayError::IrregularShape { depth: 1, .. })
    ));
}
