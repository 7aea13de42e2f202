use std::cell::RefCell;
use std::rc::Rc;

use softwrap_mapping::{
    IncrementalCacheUpdateEvent, RecalculationEngine, SoftWrapVisualSizeManager,
    TextBasedSoftWrapPainter,
};

fn main() {
    let text = "fn main() {\n    println!(\"soft wraps reserve marker space\");\n}";
    let mut engine = RecalculationEngine::new(text, 24);
    let mut manager = SoftWrapVisualSizeManager::new(TextBasedSoftWrapPainter::default());

    let reports = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&reports);
    manager.add_visual_size_change_listener(move |change| {
        sink.borrow_mut().push((
            change.start_line,
            change.last_line,
            change.widths.to_sorted_vec(),
        ));
    });

    // Full pass over the document.
    engine.recalculate_all(&mut manager);

    // Narrow the viewport and re-layout only the long line.
    engine.set_viewport_width(16);
    engine.recalculate(IncrementalCacheUpdateEvent::new(1, 1, 1), &mut manager);

    for (start, last, widths) in reports.borrow().iter() {
        println!("batch lines {start}..={last}:");
        for (line, width) in widths {
            println!("  line {line}: max visual width {width} cells");
        }
    }
}
