use serde_json::json;
use shared::LeafKind;

use super::StyleSchema;

/// Every style leaf the charting widget reads, grouped as the widget draws them.
pub fn chart_schema() -> StyleSchema {
    let mut schema = StyleSchema::new()
        // Chart frame
        .fill("chart.background")
        .stroke("chart.border")
        .text("chart.instrumentWatermark.symbol")
        .text("chart.instrumentWatermark.details")
        // Panels
        .stroke("chartPanel.grid")
        .text("chartPanel.title")
        .optional(
            "chartPanel.watermark.text",
            LeafKind::Text,
            json!({
                "fontFamily": "Arial",
                "fontSize": 40,
                "fillColor": "rgba(128, 128, 128, 0.3)",
                "strokeEnabled": false
            }),
        )
        // Scales
        .fill("valueScale.fill")
        .text("valueScale.text")
        .stroke("valueScale.line")
        .text("valueScale.valueMarker.text")
        .fill("valueScale.valueMarker.fill")
        .fill("dateScale.fill")
        .text("dateScale.text")
        .stroke("dateScale.line")
        .text("dateScale.dateMarker.text")
        .fill("dateScale.dateMarker.fill")
        .stroke("dateScale.dateMarker.stroke")
        // Interaction overlays
        .stroke("crossHair.line")
        .fill("crossHair.fill")
        .text("crossHair.text")
        .stroke("zoomIn.border")
        .fill("zoomIn.fill")
        .stroke("selectionMarker.line")
        .fill("selectionMarker.fill")
        // Plots
        .stroke("plot.line.simple")
        .stroke("plot.line.mountain.line")
        .fill("plot.line.mountain.fill")
        .stroke("plot.bar.OHLC")
        .stroke("plot.bar.HLC")
        .stroke("plot.bar.HL")
        .stroke("plot.bar.coloredOHLC.upBar")
        .stroke("plot.bar.coloredOHLC.downBar");

    for style in ["candle", "heikinAshi", "hollowCandle"] {
        for direction in ["upCandle", "downCandle"] {
            let base = format!("plot.bar.{}.{}", style, direction);
            schema = schema
                .stroke(format!("{}.border", base))
                .fill(format!("{}.fill", base))
                .stroke(format!("{}.wick", base));
        }
    }

    schema = schema
        .stroke("plot.histogram.column.line")
        .fill("plot.histogram.column.fill")
        .stroke("plot.point.dot.line")
        .fill("plot.point.dot.fill")
        .stroke("plot.indicator.line")
        // Drawings and tooltips
        .stroke("drawing.line")
        .fill("drawing.fill")
        .text("drawing.text")
        .fill("drawing.centerPointFill")
        .text("tooltip.text")
        .fill("tooltip.fill")
        .stroke("tooltip.border")
        // Market depth
        .stroke("spread.ask.line")
        .stroke("spread.bid.line")
        .fill("spread.fill")
        .fill("highlightedColumn.fill")
        .fill("button.fill")
        .text("button.text")
        .stroke("button.border");

    // Trading bars
    for side in ["long", "short"] {
        schema = schema.stroke(format!("positionBar.{}.line", side));
        for label in ["kind", "quantity", "price"] {
            schema = schema
                .text(format!("positionBar.{}.{}.text", side, label))
                .fill(format!("positionBar.{}.{}.fill", side, label));
        }
    }

    for side in ["buy", "sell"] {
        schema = schema.stroke(format!("orderBar.{}.line", side));
        for state in ["submitted", "accepted", "pending"] {
            schema = schema
                .text(format!("orderBar.{}.{}.text", side, state))
                .fill(format!("orderBar.{}.{}.fill", side, state));
        }
    }

    schema
}
