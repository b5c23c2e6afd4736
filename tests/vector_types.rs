//! Integration tests for Vector2 and Vector3.

use lxmath::error::LinalgError;
use lxmath::math::{Arguments, BaseVector, Vector2, Vector3, ARRAY_KEY};
use ndarray::{arr1, Array1};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn vector_default_is_zero() {
    init_logger();
    let v2 = Vector2::from_args(Arguments::new()).unwrap();
    let v3 = Vector3::from_args(Arguments::new()).unwrap();
    assert_eq!(v2.components(), vec![0.0, 0.0]);
    assert_eq!(v3.components(), vec![0.0, 0.0, 0.0]);
    assert_eq!(v3, Vector3::zeros());
}

#[test]
fn vector_from_scalars_keeps_order() {
    let v2 = Vector2::from_args(Arguments::new().arg(0.3127).arg(0.329)).unwrap();
    assert_eq!((v2.x(), v2.y()), (0.3127, 0.329));

    let v3 = Vector3::from_args(Arguments::positional([0.95047, 1.0, 1.08883])).unwrap();
    assert_eq!((v3.x(), v3.y(), v3.z()), (0.95047, 1.0, 1.08883));

    let ints = Vector3::from_args(Arguments::new().arg(1).arg(2).arg(3)).unwrap();
    assert_eq!(ints, Vector3::new(1.0, 2.0, 3.0));
}

#[test]
fn vector_from_named_components() {
    let v = Vector3::from_args(
        Arguments::new()
            .kwarg("z", 3.0)
            .kwarg("x", 1.0)
            .kwarg("y", 2.0),
    )
    .unwrap();
    assert_eq!(v.components(), vec![1.0, 2.0, 3.0]);

    let missing_z = Vector3::from_args(Arguments::new().kwarg("x", 1.0).kwarg("y", 2.0));
    assert!(missing_z.unwrap_err().is_resolution());
}

#[test]
fn vector_from_named_instance_and_array() {
    let original = Vector2::new(4.0, 5.0);
    let copy = Vector2::from_args(Arguments::new().kwarg("vector2", &original)).unwrap();
    assert_eq!(copy, original);

    let from_list = Vector2::from_args(Arguments::new().kwarg(ARRAY_KEY, vec![4.0, 5.0])).unwrap();
    assert_eq!(from_list, original);
}

#[test]
fn vector_empty_named_argument_falls_back_to_default() {
    let v = Vector2::from_args(Arguments::new().kwarg("vector2", None::<&Vector2>)).unwrap();
    assert_eq!(v, Vector2::zeros());

    let v = Vector3::from_args(Arguments::new().kwarg(ARRAY_KEY, None::<Vec<f64>>)).unwrap();
    assert_eq!(v, Vector3::zeros());
}

#[test]
fn vector_rejects_wrong_arity_and_types() {
    let err = Vector2::from_args(Arguments::positional([1.0, 2.0, 3.0])).unwrap_err();
    assert!(matches!(err, LinalgError::Unresolved { target: "Vector2", .. }));

    let v3 = Vector3::new(1.0, 2.0, 3.0);
    let err = Vector2::from_args(Arguments::new().arg(&v3)).unwrap_err();
    assert!(err.is_resolution());

    let err = Vector3::from_array(arr1(&[1.0, 2.0])).unwrap_err();
    assert!(err.is_resolution());

    let err = Vector2::from_args(Arguments::new().arg(1.0).arg(None::<f64>)).unwrap_err();
    assert!(err.is_resolution());
}

#[test]
fn vector_rejects_mixed_arguments() {
    let err = Vector2::from_args(Arguments::new().arg(1.0).kwarg("y", 2.0)).unwrap_err();
    assert!(matches!(err, LinalgError::MixedArguments { target: "Vector2", .. }));
    assert!(err.to_string().starts_with("Mix of positional and named arguments"));
}

// ---------------------------------------------------------------------------
// Copy and aliasing
// ---------------------------------------------------------------------------

#[test]
fn vector_copy_is_independent() {
    let mut original = Vector3::new(1.0, 2.0, 3.0);
    let copy = Vector3::from_args(Arguments::new().arg(&original)).unwrap();
    original.set_x(10.0);
    assert_eq!(copy.x(), 1.0);
    assert!(!copy.is_view());
}

#[test]
fn vector_views_external_buffer() {
    init_logger();
    let mut source = arr1(&[0.25, 0.5, 0.75]);
    let cells = source.cell_view();
    let v = Vector3::view(cells).unwrap();
    assert!(v.is_view());

    cells[1].set(9.0);
    assert_eq!(v.y(), 9.0);
}

#[test]
fn vector_writes_reach_external_buffer() {
    let mut source = arr1(&[1.0, 2.0]);
    {
        let mut v = Vector2::from_args(Arguments::new().arg(&mut source)).unwrap();
        v.set_y(-2.0);
        v *= 3.0;
        v += &Vector2::new(1.0, 1.0);
    }
    assert_eq!(source, arr1(&[4.0, -5.0]));
}

#[test]
fn two_views_share_one_buffer() {
    let mut source = Array1::<f64>::zeros(3);
    let cells = source.cell_view();
    let mut a = Vector3::view(cells).unwrap();
    let b = Vector3::view(cells).unwrap();
    a.set_z(1.5);
    assert_eq!(b.z(), 1.5);
    let detached = b.into_owned();
    a.set_z(2.5);
    assert_eq!(detached.z(), 1.5);
}

#[test]
fn list_literal_is_materialized_not_aliased() {
    let list = vec![1.0, 2.0];
    let mut v = Vector2::from_args(Arguments::new().arg(list.clone())).unwrap();
    assert!(!v.is_view());
    v.set_x(5.0);
    assert_eq!(list, vec![1.0, 2.0]);
}

// ---------------------------------------------------------------------------
// Conversions and arithmetic
// ---------------------------------------------------------------------------

#[test]
fn to_v3f_appends_component() {
    let mut source = arr1(&[0.1, 0.2]);
    let cells = source.cell_view();
    let v2 = Vector2::view(cells).unwrap();
    let v3 = v2.to_v3f(0.7);
    assert_eq!(v3, Vector3::new(0.1, 0.2, 0.7));
    assert!(!v3.is_view());
    cells[0].set(100.0);
    assert_eq!(v3.x(), 0.1);
}

#[test]
fn vector_arithmetic_returns_owned_results() {
    let a = Vector3::new(1.0, 2.0, 3.0);
    let b = Vector3::new(0.5, 0.5, 0.5);
    assert_eq!(&a + &b, Vector3::new(1.5, 2.5, 3.5));
    assert_eq!(&a - &b, Vector3::new(0.5, 1.5, 2.5));
    assert_eq!(&a * 2.0, Vector3::new(2.0, 4.0, 6.0));
    assert_eq!(2.0 * &a, &a * 2.0);
    assert_eq!(&a / 2.0, Vector3::new(0.5, 1.0, 1.5));
    assert_eq!(-&a, Vector3::new(-1.0, -2.0, -3.0));
    assert_eq!(a.dot(&b), 3.0);
    assert_eq!(a, Vector3::new(1.0, 2.0, 3.0));
}

#[test]
fn vector_exposes_array() {
    let v = Vector2::from_array(arr1(&[3.0, 4.0])).unwrap();
    assert_eq!(v.to_array(), arr1(&[3.0, 4.0]));
    assert_eq!(v.length(), 5.0);
}
