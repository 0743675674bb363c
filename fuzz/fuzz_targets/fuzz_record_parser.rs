#![no_main]

use libfuzzer_sys::fuzz_target;

use luxgrid::grid::{GridAggregator, GridSpec};
use luxgrid::lux::LuxConverter;
use luxgrid::record::RgbDataset;

fuzz_target!(|data: &[u8]| {
    // Try to parse arbitrary bytes as a record file - we expect this to
    // either succeed or fail gracefully. The key is that it should NEVER
    // panic.
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(dataset) = RgbDataset::parse(text) {
        // If parsing succeeded, push the data through the rest of the
        // pipeline to catch panics during conversion and aggregation.
        let lux = LuxConverter::new().convert(&dataset);
        let aggregator = GridAggregator::new(GridSpec::new(7, 9));
        if let Ok(grid) = aggregator.aggregate(&lux) {
            // Statistics may legitimately fail on degenerate grids.
            let _ = grid.statistics();
        }
    }
});
