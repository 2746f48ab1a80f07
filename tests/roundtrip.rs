//! Load and export through the built-in codecs.

use std::{fmt::Write as _, fs, path::Path};

use asset_viewer::{
    codec::{native::NativeMeshCodec, raster::ImageCrateCodec, MeshCodec, MeshFormat, RenderSurface},
    data::{DecodedMesh, GeometryBuffer},
    exporter,
    loader::{self, LoadOptions},
    render::RenderParams,
    transcode,
    util::bbox::OptionalBoundingBox3d,
    ViewerConfig, ViewerController, ViewerError,
};
use rgb::RGB8;

struct NullSurface;

impl RenderSurface for NullSurface {
    fn render(&mut self, _buffer: &GeometryBuffer, _params: &RenderParams) {}
    fn clear_scene(&mut self) {}
    fn set_background(&mut self, _color: RGB8) {}
    fn reset_camera(&mut self, _bounds: OptionalBoundingBox3d<f32>) {}
    fn capture_screenshot(&mut self, _path: &Path, _transparent: bool) -> anyhow::Result<()> {
        Ok(())
    }
}

fn viewer() -> ViewerController<NullSurface> {
    ViewerController::new(
        NullSurface,
        Box::new(NativeMeshCodec::new()),
        Box::new(ImageCrateCodec::new()),
        ViewerConfig::default(),
    )
}

/// Colored ASCII PLY strip with `n` vertices.
fn colored_ply(n: usize) -> String {
    let mut s = String::new();
    writeln!(s, "ply\nformat ascii 1.0\nelement vertex {}", n).unwrap();
    s.push_str("property float x\nproperty float y\nproperty float z\n");
    s.push_str("property uchar red\nproperty uchar green\nproperty uchar blue\n");
    writeln!(s, "element face {}", n - 2).unwrap();
    s.push_str("property list uchar int vertex_indices\nend_header\n");
    for i in 0..n {
        writeln!(s, "{} {} 0 {} {} {}", i, i % 2, (i * 37) % 256, (i * 91) % 256, 255 - i).unwrap();
    }
    for i in 0..n - 2 {
        writeln!(s, "3 {} {} {}", i, i + 1, i + 2).unwrap();
    }
    s
}

fn expected_color(i: usize) -> RGB8 {
    RGB8::new(((i * 37) % 256) as u8, ((i * 91) % 256) as u8, (255 - i) as u8)
}

#[test]
fn ply_colors_survive_export() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("strip.ply");
    fs::write(&src, colored_ply(12)).unwrap();

    let mut viewer = viewer();
    viewer.open_mesh(&src).unwrap();
    let colors = viewer.asset().unwrap().buffer().vertex_color().unwrap().to_vec();
    assert_eq!(colors, (0..12).map(expected_color).collect::<Vec<_>>());

    for ext in ["ply", "off", "obj"] {
        let dest = dir.path().join(format!("out.{}", ext));
        viewer.save_as(&dest).unwrap();
        assert!(!dir.path().join(format!("out.{}.part", ext)).exists());

        let loaded = loader::load_mesh(&NativeMeshCodec::new(), &dest, &LoadOptions::default())
            .unwrap();
        assert_eq!(loaded.buffer.vertices().len(), 12, "{}", ext);
        let back = loaded.buffer.vertex_color().unwrap();
        for (a, b) in back.iter().zip(&colors) {
            // OBJ stores normalized floats, which may truncate one step down.
            assert!(
                (i16::from(a.r) - i16::from(b.r)).abs() <= 1
                    && (i16::from(a.g) - i16::from(b.g)).abs() <= 1
                    && (i16::from(a.b) - i16::from(b.b)).abs() <= 1,
                "{}: {:?} vs {:?}",
                ext,
                a,
                b
            );
        }
    }
}

#[test]
fn stl_export_drops_colors() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("strip.ply");
    fs::write(&src, colored_ply(6)).unwrap();

    let mut viewer = viewer();
    viewer.open_mesh(&src).unwrap();
    let dest = dir.path().join("out.stl");
    viewer.save_as(&dest).unwrap();

    let loaded = loader::load_mesh(&NativeMeshCodec::new(), &dest, &LoadOptions::default()).unwrap();
    assert_eq!(loaded.buffer.faces().len(), 4);
    assert!(loaded.buffer.vertex_color().is_none());
}

#[test]
fn size_mismatch_exports_without_color() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("strip.ply");
    fs::write(&src, colored_ply(8)).unwrap();
    let codec = NativeMeshCodec::new();
    let loaded = loader::load_mesh(&codec, &src, &LoadOptions::default()).unwrap();

    let short = vec![RGB8::new(1, 2, 3); 7];
    let dest = dir.path().join("short.ply");
    exporter::export(&codec, &loaded.authoring, Some(&short[..]), &dest).unwrap();

    let back = loader::load_mesh(&codec, &dest, &LoadOptions::default()).unwrap();
    assert_eq!(back.buffer.vertices().len(), 8);
    assert!(back.buffer.vertex_color().is_none());
}

#[test]
fn obj_objects_are_concatenated() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("two.obj");
    let mut obj = String::new();
    let mut base = 1;
    for (name, n) in [("first", 10), ("second", 20)] {
        writeln!(obj, "o {}", name).unwrap();
        for i in 0..n {
            writeln!(obj, "v {} {} 0", i, i % 2).unwrap();
        }
        for i in 0..n - 2 {
            writeln!(obj, "f {} {} {}", base + i, base + i + 1, base + i + 2).unwrap();
        }
        base += n;
    }
    fs::write(&src, obj).unwrap();

    let codec = NativeMeshCodec::new();
    assert!(matches!(
        codec.decode_mesh(&src, MeshFormat::Obj).unwrap(),
        DecodedMesh::Scene(ref parts) if parts.len() == 2
    ));
    let loaded = loader::load_mesh(&codec, &src, &LoadOptions::default()).unwrap();
    assert_eq!(loaded.buffer.vertices().len(), 30);
    assert_eq!(loaded.buffer.faces().len(), 8 + 18);
}

#[test]
fn off_float_colors_use_range_heuristic() {
    let dir = tempfile::tempdir().unwrap();
    let normalized = dir.path().join("normalized.off");
    fs::write(
        &normalized,
        "COFF\n3 1 0\n0 0 0 0 0 0 1\n1 0 0 1 1 1 1\n0 1 0 0.5 0.5 0.5 1\n3 0 1 2\n",
    )
    .unwrap();
    let codec = NativeMeshCodec::new();
    let loaded = loader::load_mesh(&codec, &normalized, &LoadOptions::default()).unwrap();
    assert_eq!(
        loaded.buffer.vertex_color().unwrap(),
        &[RGB8::new(0, 0, 0), RGB8::new(255, 255, 255), RGB8::new(127, 127, 127)]
    );

    let bytes = dir.path().join("bytes.off");
    fs::write(
        &bytes,
        "COFF\n3 1 0\n0 0 0 0 0 0 255\n1 0 0 255 255 255 255\n0 1 0 10 20 30 255\n3 0 1 2\n",
    )
    .unwrap();
    let loaded = loader::load_mesh(&codec, &bytes, &LoadOptions::default()).unwrap();
    assert_eq!(
        loaded.buffer.vertex_color().unwrap(),
        &[RGB8::new(0, 0, 0), RGB8::new(255, 255, 255), RGB8::new(10, 20, 30)]
    );
    let authoring = transcode::to_authoring(loaded.buffer.vertex_color().unwrap(), 3).unwrap();
    assert!(authoring.iter().all(|c| c.a == 255));
}

#[test]
fn xyz_point_clouds_need_opt_in() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("cloud.xyz");
    fs::write(&src, "# x y z r g b\n0 0 0 1 0 0\n1 0 0 0 1 0\n0 1 0 0 0 1\n").unwrap();
    let codec = NativeMeshCodec::new();

    assert!(loader::load_mesh(&codec, &src, &LoadOptions::default()).is_err());
    let loaded = loader::load_mesh(
        &codec,
        &src,
        &LoadOptions {
            accept_point_clouds: true,
        },
    )
    .unwrap();
    assert!(loaded.buffer.is_point_cloud());
    assert_eq!(loaded.buffer.vertex_color().unwrap()[2], RGB8::new(0, 0, 255));
}

#[test]
fn images_load_as_planes() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("photo.png");
    image::RgbaImage::from_pixel(6, 3, image::Rgba([1, 2, 3, 4]))
        .save(&src)
        .unwrap();

    let mut viewer = viewer();
    viewer.open_image(&src).unwrap();
    let buffer = viewer.asset().unwrap().buffer();
    assert_eq!(buffer.texture_image().unwrap().dimensions(), (6, 3));
    let bbox = buffer.bbox().bounding_box().unwrap();
    assert_eq!(bbox.center(), cgmath::Point3::new(3.0, 1.5, 0.0));

    assert!(viewer.open_image(dir.path().join("missing.png")).is_err());
    assert!(viewer.asset().is_none());
}

#[test]
fn zero_vertex_file_is_empty_geometry() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("empty.ply");
    fs::write(
        &src,
        "ply\nformat ascii 1.0\nelement vertex 0\nproperty float x\nproperty float y\n\
         property float z\nelement face 0\nproperty list uchar int vertex_indices\nend_header\n",
    )
    .unwrap();

    let mut viewer = viewer();
    assert!(matches!(
        viewer.open_mesh(&src),
        Err(ViewerError::EmptyGeometry)
    ));
    assert!(viewer.asset().is_none());
}

#[test]
fn corrupt_off_counts_fail_to_decode() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("huge.off");
    fs::write(&src, "OFF\n18446744073709551615 0 0\n0 0 0\n").unwrap();

    let mut viewer = viewer();
    assert!(matches!(
        viewer.open_mesh(&src),
        Err(ViewerError::Decode { .. })
    ));
    assert!(viewer.asset().is_none());
}

#[test]
fn export_errors_name_the_destination() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("strip.ply");
    fs::write(&src, colored_ply(4)).unwrap();

    let mut viewer = viewer();
    viewer.open_mesh(&src).unwrap();
    let dest = dir.path().join("missing").join("out.ply");
    let err = viewer.save_as(&dest).unwrap_err();
    assert!(matches!(err, ViewerError::Export { ref path, .. } if *path == dest));
    assert!(!viewer.status().contains(".part"), "{}", viewer.status());
    assert!(viewer.asset().is_some());
}
