use anyhow::Result;
use lxmath::math::{Arguments, BaseVector, Matrix3x3, Vector2, Vector3};
use ndarray::arr2;

fn main() -> Result<()> {
    env_logger::init();

    // Linear sRGB -> CIE XYZ (D65)
    let mut rgb_to_xyz = arr2(&[
        [0.4124564, 0.3575761, 0.1804375],
        [0.2126729, 0.7151522, 0.0721750],
        [0.0193339, 0.1191920, 0.9503041],
    ]);

    let xyz_to_rgb = Matrix3x3::from_array(rgb_to_xyz.clone())?.inverse()?;
    println!("XYZ -> RGB:\n{}", xyz_to_rgb);

    let cells = rgb_to_xyz.cell_view();
    let forward = Matrix3x3::view(cells)?;

    let white = Vector3::from_args(Arguments::positional([1.0, 1.0, 1.0]))?;
    let xyz = &forward * &white;
    println!("white in XYZ: {}", xyz);
    println!("back to RGB:  {}", &xyz_to_rgb * &xyz);

    let d65 = Vector2::from_args(Arguments::new().kwarg("x", 0.3127).kwarg("y", 0.3290))?;
    let white_point = d65.to_v3f(1.0 - d65.x() - d65.y());
    println!("D65 xyY chromaticity: {}", white_point);

    // Writes through the caller's buffer are visible to the matrix view.
    cells
        .iter()
        .zip(ndarray::Array2::<f64>::eye(3).iter())
        .for_each(|(cell, value)| cell.set(*value));
    println!("forward is identity after overwrite: {}", forward.is_identity());

    Ok(())
}
