use burn::tensor::{Tensor, TensorData};
use burn_cplx::{
    BinaryOp, Complex64, Cplx, CplxError, IndexItem, Scalar, cplx_cos, cplx_cosh, cplx_exp,
    cplx_linear, cplx_log, cplx_sin, cplx_sinh, cplx_tan, cplx_tanh, cplx_to_real, real_to_cplx,
};
use ndarray::{ArrayBase, ArrayD, Axis, Data, Dimension, IxDyn, s};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

type TB = burn::backend::NdArray<f64>;

const RTOL: f64 = 1e-7;
const ATOL: f64 = 1e-9;

fn rng() -> StdRng {
    StdRng::seed_from_u64(1249563438)
}

fn randn_cplx(rng: &mut StdRng, shape: &[usize]) -> ArrayD<Complex64> {
    ArrayD::from_shape_simple_fn(IxDyn(shape), || {
        Complex64::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0))
    })
}

fn randn_real(rng: &mut StdRng, shape: &[usize]) -> ArrayD<f64> {
    ArrayD::from_shape_simple_fn(IxDyn(shape), || rng.random_range(0.5..1.5))
}

fn wrap<const D: usize>(array: &ArrayD<Complex64>) -> Cplx<TB, D> {
    Cplx::from_ndarray(array, &Default::default()).unwrap()
}

fn real_tensor<const D: usize>(array: &ArrayD<f64>) -> Tensor<TB, D> {
    let values = array.iter().copied().collect::<Vec<_>>();
    Tensor::from_data(TensorData::new(values, array.shape().to_vec()), &Default::default())
}

fn assert_close(expected: f64, actual: f64) {
    assert!(
        (expected - actual).abs() <= ATOL + RTOL * expected.abs(),
        "expected {expected}, got {actual}"
    );
}

fn assert_allclose<S, Dim>(expected: &ArrayBase<S, Dim>, actual: Vec<f64>)
where
    S: Data<Elem = f64>,
    Dim: Dimension,
{
    assert_eq!(expected.len(), actual.len());
    for (expected, actual) in expected.iter().zip(actual) {
        assert_close(*expected, actual);
    }
}

fn assert_allclose_cplx<S, Dim, const D: usize>(expected: &ArrayBase<S, Dim>, actual: &Cplx<TB, D>)
where
    S: Data<Elem = Complex64>,
    Dim: Dimension,
{
    let actual = actual.to_ndarray().unwrap();
    assert_eq!(expected.shape(), actual.shape());
    for (expected, actual) in expected.iter().zip(actual.iter()) {
        assert_close(expected.re, actual.re);
        assert_close(expected.im, actual.im);
    }
}

fn values<const D: usize>(tensor: Tensor<TB, D>) -> Vec<f64> {
    tensor.into_data().iter::<f64>().collect()
}

#[test]
fn creation() {
    let mut rng = rng();
    let device = Default::default();
    let a = randn_cplx(&mut rng, &[5, 5, 200]);

    let real = real_tensor::<3>(&a.mapv(|z| z.re));
    let imag = real_tensor::<3>(&a.mapv(|z| z.im));
    let p = Cplx::try_new((real.clone(), imag), &device).unwrap();
    assert_eq!(a.len_of(Axis(0)), p.len());
    assert_allclose_cplx(&a, &p);

    let a = a.mapv(|z| Complex64::new(z.re, 0.0));
    let p = Cplx::try_new(real.clone(), &device).unwrap();
    assert_eq!(a.len_of(Axis(0)), p.len());
    assert_allclose_cplx(&a, &p);

    Cplx::<TB, 1>::try_new(0.0, &device).unwrap();
    Cplx::<TB, 1>::try_new(Complex64::new(-1.0, 1.0), &device).unwrap();

    assert!(matches!(
        Cplx::<TB, 1>::try_new(0, &device),
        Err(CplxError::Type(_))
    ));
    assert!(matches!(
        Cplx::<TB, 1>::try_new(Scalar::Int(0), &device),
        Err(CplxError::Type(_))
    ));
    assert!(matches!(
        Cplx::try_new(
            (
                Tensor::<TB, 2>::ones([11, 10], &device),
                Tensor::<TB, 2>::ones([10, 11], &device)
            ),
            &device
        ),
        Err(CplxError::Value(_))
    ));
}

#[test]
fn type_to_from_ndarray() {
    let mut rng = rng();
    let a = randn_cplx(&mut rng, &[10, 32, 64]);
    let b = randn_cplx(&mut rng, &[10, 64, 40]);

    let p = Cplx::<TB, 3>::new(
        real_tensor(&a.mapv(|z| z.re)),
        real_tensor(&a.mapv(|z| z.im)),
    )
    .unwrap();
    let q = wrap::<3>(&b);

    assert!(p.clone().all_close(wrap(&a), Some(0.0), Some(0.0)));
    assert_eq!(p.to_ndarray().unwrap(), a);
    assert_eq!(q.to_ndarray().unwrap(), b);
}

#[test]
fn arithmetic_unary() {
    let mut rng = rng();
    let a = randn_cplx(&mut rng, &[10, 20, 5]);
    let p = wrap::<3>(&a);

    assert_allclose_cplx(&a, &p);
    assert_allclose(&a.mapv(|z| z.norm()), values(p.abs()));
    assert_allclose(&a.mapv(|z| z.arg()), values(p.angle()));
    assert_allclose_cplx(&a.mapv(|z| z.conj()), &p.conjugate());
    assert_allclose_cplx(&a.mapv(|z| z.conj()), &p.conj());
    assert_allclose_cplx(&a, &p.clone());
    assert_allclose_cplx(&a.mapv(|z| -z), &-p);
}

#[test]
fn arithmetic_binary() {
    let mut rng = rng();
    let a = randn_cplx(&mut rng, &[10, 20, 5]);
    let b = randn_cplx(&mut rng, &[10, 20, 5]);
    let c = randn_real(&mut rng, &[10, 20, 5]);

    let p = wrap::<3>(&a);
    let q = wrap::<3>(&b);
    let r = real_tensor::<3>(&c);

    assert_allclose_cplx(&(&a + &b), &(p.clone() + q.clone()));
    assert_allclose_cplx(&(&a - &b), &(p.clone() - q.clone()));
    assert_allclose_cplx(&(&a * &b), &(p.clone() * q.clone()));
    assert_allclose_cplx(&(&a / &b), &(p.clone() / q.clone()));

    let scalars = [
        Scalar::Int(10),
        Scalar::Float(3.1415),
        Scalar::Complex(Complex64::new(1e-3, 1e3)),
        Scalar::Complex(Complex64::new(0.0, -10.0)),
    ];
    for scalar in scalars {
        let z = scalar.to_complex();
        let apply = |op| q.clone().apply(op, scalar);
        let reflect = |op| q.clone().apply_reflected(op, scalar).unwrap();

        assert_allclose_cplx(&b.mapv(|v| v + z), &apply(BinaryOp::Add));
        assert_allclose_cplx(&b.mapv(|v| v - z), &apply(BinaryOp::Sub));
        assert_allclose_cplx(&b.mapv(|v| v * z), &apply(BinaryOp::Mul));
        assert_allclose_cplx(&b.mapv(|v| v / z), &apply(BinaryOp::Div));

        assert_allclose_cplx(&b.mapv(|v| z + v), &reflect(BinaryOp::Add));
        assert_allclose_cplx(&b.mapv(|v| z - v), &reflect(BinaryOp::Sub));
        assert_allclose_cplx(&b.mapv(|v| z * v), &reflect(BinaryOp::Mul));
        assert_allclose_cplx(&b.mapv(|v| z / v), &reflect(BinaryOp::Div));
    }

    // Operator forms for native integers, floats and complex values.
    let ten = Complex64::new(10.0, 0.0);
    assert_allclose_cplx(&b.mapv(|v| v + ten), &(q.clone() + 10));
    assert_allclose_cplx(&b.mapv(|v| ten / v), &(10 / q.clone()));
    let z = Complex64::new(1e-3, 1e3);
    assert_allclose_cplx(&b.mapv(|v| v * 3.1415), &(q.clone() * 3.1415));
    assert_allclose_cplx(&b.mapv(|v| 3.1415 - v), &(3.1415 - q.clone()));
    assert_allclose_cplx(&b.mapv(|v| v / z), &(q.clone() / z));
    assert_allclose_cplx(&b.mapv(|v| z / v), &(z / q.clone()));

    let bc = |f: fn(Complex64, f64) -> Complex64| {
        let mut out = b.clone();
        out.zip_mut_with(&c, |v, &w| *v = f(*v, w));
        out
    };
    assert_allclose_cplx(&bc(|v, w| v + w), &(q.clone() + r.clone()));
    assert_allclose_cplx(&bc(|v, w| v - w), &(q.clone() - r.clone()));
    assert_allclose_cplx(&bc(|v, w| v * w), &(q.clone() * r.clone()));
    assert_allclose_cplx(&bc(|v, w| v / w), &(q.clone() / r.clone()));

    for op in [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div] {
        let error = q.clone().apply_reflected(op, r.clone()).unwrap_err();
        assert!(matches!(error, CplxError::Type(_)));
        assert!(
            error.to_string().contains("be Tensor, not Cplx"),
            "unexpected message: {error}"
        );
    }
}

#[test]
fn algebraic_functions() {
    let mut rng = rng();
    let a = randn_cplx(&mut rng, &[10, 20, 5]);
    let p = wrap::<3>(&a);

    assert_allclose_cplx(&a.mapv(|z| z.exp()), &cplx_exp(p.clone()));
    assert_allclose_cplx(&a.mapv(|z| z.ln()), &cplx_log(p.clone()));

    assert_allclose_cplx(&a.mapv(|z| z.sin()), &cplx_sin(p.clone()));
    assert_allclose_cplx(&a.mapv(|z| z.cos()), &cplx_cos(p.clone()));
    assert_allclose_cplx(&a.mapv(|z| z.tan()), &cplx_tan(p.clone()));

    assert_allclose_cplx(&a.mapv(|z| z.sinh()), &cplx_sinh(p.clone()));
    assert_allclose_cplx(&a.mapv(|z| z.cosh()), &cplx_cosh(p.clone()));
    assert_allclose_cplx(&a.mapv(|z| z.tanh()), &cplx_tanh(p));
}

#[test]
fn slicing() {
    let mut rng = rng();
    let a = randn_cplx(&mut rng, &[10, 20, 5])
        .into_dimensionality::<ndarray::Ix3>()
        .unwrap();
    let p = wrap::<3>(&a.clone().into_dyn());

    for i in 0..a.shape()[0] {
        assert_allclose_cplx(&a.slice(s![i, .., ..]), &p.select::<2>(i as isize).unwrap());
    }

    for i in 0..a.shape()[1] {
        let items = [IndexItem::step(2), IndexItem::At(i as isize)];
        assert_allclose_cplx(&a.slice(s![..;2, i, ..]), &p.index::<2>(&items).unwrap());
    }

    for i in 0..a.shape()[1] {
        let items = [IndexItem::slice(Some(1), None, 3), IndexItem::At(i as isize)];
        assert_allclose_cplx(&a.slice(s![1..;3, i, ..]), &p.index::<2>(&items).unwrap());
    }

    for i in 0..a.shape()[2] {
        let items = [IndexItem::Ellipsis, IndexItem::At(i as isize)];
        assert_allclose_cplx(&a.slice(s![.., .., i]), &p.index::<2>(&items).unwrap());
    }

    assert!(matches!(p.select::<2>(10), Err(CplxError::Index(_))));
    assert!(matches!(
        p.index::<1>(&[IndexItem::At(2), IndexItem::Ellipsis, IndexItem::At(-10)]),
        Err(CplxError::Index(_))
    ));
}

#[test]
fn iteration() {
    let mut rng = rng();
    let a = randn_cplx(&mut rng, &[10, 20, 5])
        .into_dimensionality::<ndarray::Ix3>()
        .unwrap();
    let p = wrap::<3>(&a.clone().into_dyn());

    let forward = p.iter::<2>().unwrap();
    assert_eq!(forward.len(), a.len_of(Axis(0)));
    for (u, v) in a.outer_iter().zip(forward) {
        assert_allclose_cplx(&u, &v);
    }

    let reversed = a.slice(s![..;-1, .., ..]);
    for (u, v) in reversed.outer_iter().zip(p.reversed::<2>().unwrap()) {
        assert_allclose_cplx(&u, &v);
    }
    assert_allclose_cplx(&reversed, &p.index::<3>(&[IndexItem::step(-1)]).unwrap());

    // The source is untouched and can be iterated again.
    assert_allclose_cplx(&a, &p);
    assert_eq!(p.iter::<2>().unwrap().count(), 10);

    let last = p.select::<2>(-1).unwrap();
    for (u, v) in a.slice(s![-1, .., ..]).outer_iter().zip(last.iter::<1>().unwrap()) {
        assert_allclose_cplx(&u, &v);
    }

    let trailing = p
        .index::<2>(&[IndexItem::Ellipsis, IndexItem::At(-1)])
        .unwrap();
    for (u, v) in a.slice(s![.., .., -1]).outer_iter().zip(trailing.iter::<1>().unwrap()) {
        assert_allclose_cplx(&u, &v);
    }
}

#[test]
fn linear_matmul() {
    let mut rng = rng();
    let a = randn_cplx(&mut rng, &[10, 32, 64])
        .into_dimensionality::<ndarray::Ix3>()
        .unwrap();
    let b = randn_cplx(&mut rng, &[10, 64, 40])
        .into_dimensionality::<ndarray::Ix3>()
        .unwrap();

    let p = wrap::<3>(&a.clone().into_dyn());
    let q = wrap::<3>(&b.clone().into_dyn());

    let mut expected = Vec::new();
    for i in 0..a.len_of(Axis(0)) {
        let product = a.index_axis(Axis(0), i).dot(&b.index_axis(Axis(0), i));
        let pi = p.select::<2>(i as isize).unwrap();
        let qi = q.select::<2>(i as isize).unwrap();
        assert_allclose_cplx(&product, &pi.matmul(qi));
        expected.push(product.insert_axis(Axis(0)));
    }

    let views = expected.iter().map(|x| x.view()).collect::<Vec<_>>();
    let expected = ndarray::concatenate(Axis(0), &views).unwrap();
    assert_allclose_cplx(&expected, &p.matmul(q));
}

#[test]
fn linear_transform() {
    let mut rng = rng();
    let a = randn_cplx(&mut rng, &[5, 5, 200]);
    let l = randn_cplx(&mut rng, &[321, 200])
        .into_dimensionality::<ndarray::Ix2>()
        .unwrap();
    let b = randn_cplx(&mut rng, &[321])
        .into_dimensionality::<ndarray::Ix1>()
        .unwrap();

    let p = wrap::<3>(&a);
    let u = wrap::<2>(&l.clone().into_dyn());
    let q = wrap::<1>(&b.clone().into_dyn());

    let flat = a.to_shape((25, 200)).unwrap();
    let expected = flat
        .dot(&l.t())
        .into_shape_with_order((5, 5, 321))
        .unwrap();
    assert_allclose_cplx(&expected, &cplx_linear(p.clone(), u.clone(), None));

    let expected = &expected + &b;
    assert_allclose_cplx(&expected, &cplx_linear(p, u, Some(q)));
}

#[test]
fn type_conversion() {
    let mut rng = rng();
    let a = randn_cplx(&mut rng, &[5, 5, 200]);
    let b = ArrayD::from_shape_fn(IxDyn(&[5, 5, 400]), |index| {
        let z = a[[index[0], index[1], index[2] / 2]];
        match index[2] % 2 {
            0 => z.re,
            _ => z.im,
        }
    });

    let p = wrap::<3>(&a);
    let q = real_to_cplx(real_tensor::<3>(&b)).unwrap();

    assert_allclose(&b, values(cplx_to_real(p.clone())));
    assert_allclose(&b, values(cplx_to_real(q.clone())));

    assert!(p.clone().all_close(q.clone(), Some(0.0), Some(0.0)));
    assert_allclose_cplx(&a, &q);

    let device = Default::default();
    let z = Cplx::<TB, 1>::try_new(Complex64::new(-1.0, 1.0), &device).unwrap();
    assert_eq!(z.item().unwrap(), Complex64::new(-1.0, 1.0));

    let error = p.item().unwrap_err();
    assert!(matches!(error, CplxError::Value(_)));
    assert!(error.to_string().contains("one element tensors"));

    let element = p
        .index::<1>(&[IndexItem::At(0), IndexItem::At(0), IndexItem::At(0)])
        .unwrap();
    assert_eq!(a[[0, 0, 0]], element.item().unwrap());
}

#[test]
fn interleave_round_trip() {
    let mut rng = rng();
    let a = randn_cplx(&mut rng, &[3, 7]);
    let p = wrap::<2>(&a);

    let q = real_to_cplx(cplx_to_real(p)).unwrap();

    assert_eq!(q.to_ndarray().unwrap(), a);
    assert!(matches!(
        real_to_cplx(Tensor::<TB, 1>::ones([3], &Default::default())),
        Err(CplxError::Value(_))
    ));
}
