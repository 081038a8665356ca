/// Styled text report of a loaded session
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use objview_core::{Mat4, ViewerSession};
use std::io::{self, Write};

fn heading<W: Write>(writer: &mut W, title: &str) -> io::Result<()> {
    writer.queue(SetForegroundColor(Color::Yellow))?;
    writer.queue(Print(format!("{title}\n")))?;
    writer.queue(ResetColor)?;
    Ok(())
}

fn matrix<W: Write>(writer: &mut W, title: &str, m: &Mat4) -> io::Result<()> {
    heading(writer, title)?;
    for row in m.chunks_exact(4) {
        for value in row {
            let color = if !value.is_finite() {
                Color::Red
            } else if *value == 0.0 {
                Color::DarkGrey
            } else {
                Color::Cyan
            };
            writer.queue(SetForegroundColor(color))?;
            writer.queue(Print(format!("{value:>12.5}")))?;
        }
        writer.queue(Print('\n'))?;
    }
    writer.queue(ResetColor)?;
    Ok(())
}

/// Write the mesh summary, bounds and every pipeline matrix
pub fn write_report<W: Write>(writer: &mut W, session: &ViewerSession) -> io::Result<()> {
    let Some(mesh) = session.mesh() else {
        writer.queue(Print("No mesh loaded\n"))?;
        return writer.flush();
    };

    if let Some(status) = session.status_line() {
        heading(writer, &status)?;
    }

    let e = mesh.extrema();
    let [cx, cy, cz] = mesh.center();
    writer.queue(Print(format!(
        "edges: {}\nx: [{:.4}, {:.4}]\ny: [{:.4}, {:.4}]\nz: [{:.4}, {:.4}]\ncenter: ({cx:.4}, {cy:.4}, {cz:.4})\n",
        mesh.edges().len(),
        e.min_x,
        e.max_x,
        e.min_y,
        e.max_y,
        e.min_z,
        e.max_z,
    )))?;

    let settings = session.settings();
    writer.queue(Print(format!(
        "projection: {:?} (aspect {:.3}, fov {}, near {}, far {})\n\n",
        settings.mode, settings.aspect, settings.fov, settings.near, settings.far
    )))?;

    let camera = session.camera();
    matrix(writer, "model", camera.model_matrix())?;
    matrix(writer, "rotation", camera.rotation_matrix())?;
    matrix(writer, "view", camera.view_matrix())?;
    matrix(writer, "projection", camera.projection_matrix())?;
    matrix(writer, "mvp", camera.mvp_matrix())?;

    writer.flush()
}
