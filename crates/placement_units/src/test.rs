pub(crate) fn approx_eq(lhs: f64, rhs: f64, eps: f64) -> bool {
    let difference = (lhs - rhs).abs();
    println!("lhs: {}, rhs: {}, difference: {}", lhs, rhs, difference);
    difference <= eps
}
