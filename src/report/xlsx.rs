//! Formatted xlsx parcel report.
//!
//! Two-column label/value sheet with merged section headers, matching the
//! office's reference report layout. [`SectionFlags`] controls which sections
//! are emitted; fields with no data render as "Not Available".

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use super::{municode_link, ReportError, ZoningRequirements};
use crate::models::{ParcelRecord, SectionFlags};

const LABEL_COL_WIDTH: f64 = 30.0;
const VALUE_COL_WIDTH: f64 = 50.0;

const NOT_AVAILABLE: &str = "Not Available";

struct Formats {
    header: Format,
    section: Format,
    label: Format,
    value: Format,
    money: Format,
    disclaimer: Format,
}

impl Formats {
    fn new() -> Self {
        let border = FormatBorder::Thin;

        Self {
            header: Format::new()
                .set_font_name("Arial")
                .set_font_size(12)
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(Color::RGB(0x366092))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(border),
            section: Format::new()
                .set_font_name("Arial")
                .set_font_size(11)
                .set_bold()
                .set_background_color(Color::RGB(0xD9E1F2))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(border),
            label: Format::new()
                .set_font_name("Arial")
                .set_font_size(10)
                .set_bold()
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter)
                .set_text_wrap()
                .set_border(border),
            value: Format::new()
                .set_font_name("Arial")
                .set_font_size(10)
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter)
                .set_text_wrap()
                .set_border(border),
            money: Format::new()
                .set_font_name("Arial")
                .set_font_size(10)
                .set_num_format("$#,##0")
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(border),
            disclaimer: Format::new()
                .set_font_name("Arial")
                .set_font_size(8)
                .set_italic()
                .set_align(FormatAlign::Left)
                .set_text_wrap(),
        }
    }
}

/// Tracks the current row while sections are appended
struct SheetWriter<'a> {
    ws: &'a mut Worksheet,
    formats: &'a Formats,
    row: u32,
}

impl<'a> SheetWriter<'a> {
    fn section(&mut self, title: &str) -> Result<(), ReportError> {
        self.ws
            .merge_range(self.row, 0, self.row, 1, title, &self.formats.section)?;
        self.row += 1;
        Ok(())
    }

    fn data_row(&mut self, label: &str, value: &str) -> Result<(), ReportError> {
        let value = if value.trim().is_empty() {
            NOT_AVAILABLE
        } else {
            value
        };
        self.ws
            .write_with_format(self.row, 0, label, &self.formats.label)?;
        self.ws
            .write_with_format(self.row, 1, value, &self.formats.value)?;
        self.row += 1;
        Ok(())
    }

    fn money_row(&mut self, label: &str, amount: f64) -> Result<(), ReportError> {
        self.ws
            .write_with_format(self.row, 0, label, &self.formats.label)?;
        if amount > 0.0 {
            self.ws
                .write_with_format(self.row, 1, amount, &self.formats.money)?;
        } else {
            self.ws
                .write_with_format(self.row, 1, NOT_AVAILABLE, &self.formats.value)?;
        }
        self.row += 1;
        Ok(())
    }

    fn blank(&mut self) {
        self.row += 1;
    }
}

fn group_thousands(value: f64) -> String {
    let whole = value.round() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if whole < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Generate a formatted xlsx report for a parcel record.
///
/// Missing parent directories of `output_path` are created. Returns the path
/// the workbook was saved to.
pub fn generate_report(
    record: &ParcelRecord,
    zoning: Option<&ZoningRequirements>,
    sections: SectionFlags,
    output_path: &Path,
) -> Result<PathBuf, ReportError> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let formats = Formats::new();
    let mut workbook = Workbook::new();

    let ws = workbook.add_worksheet();
    ws.set_name("Parcel Information")?;
    ws.set_column_width(0, LABEL_COL_WIDTH)?;
    ws.set_column_width(1, VALUE_COL_WIDTH)?;

    ws.merge_range(0, 0, 0, 1, "PROPERTY INFORMATION REPORT", &formats.header)?;

    let mut sheet = SheetWriter {
        ws,
        formats: &formats,
        row: 2,
    };

    if sections.contains(SectionFlags::PROPERTY_INFO) {
        sheet.section("PROPERTY INFORMATION")?;
        sheet.data_row("Owner Name", &record.owner)?;
        sheet.data_row("Owner Address", &record.owner_address)?;
        sheet.data_row("Owner City/State/Zip", &record.owner_location())?;
        sheet.data_row("Property Address", &record.address)?;
        sheet.data_row("Property City/Zip", &record.property_location())?;
        sheet.data_row("Legal Description", &record.legal_description)?;
        if !record.legal_description2.is_empty() {
            sheet.data_row("Legal Description (cont.)", &record.legal_description2)?;
        }
        sheet.blank();
    }

    if sections.contains(SectionFlags::SITE_CHARACTERISTICS) {
        sheet.section("SITE CHARACTERISTICS")?;
        let acres = if record.acres > 0.0 {
            format!("{:.2} acres", record.acres)
        } else {
            String::new()
        };
        sheet.data_row("Site Area", &acres)?;
        if record.area_sqft > 0.0 {
            sheet.data_row(
                "Site Area (sq ft)",
                &format!("{} sq ft", group_thousands(record.area_sqft)),
            )?;
        }
        sheet.data_row("Section/Township/Range", &record.str_designation())?;
        if !record.subdivision.is_empty() {
            sheet.data_row("Subdivision", &record.subdivision)?;
        }
        if !record.block.is_empty() || !record.lot.is_empty() {
            sheet.data_row(
                "Block/Lot",
                &format!(
                    "Block {} / Lot {}",
                    if record.block.is_empty() { "N/A" } else { record.block.as_str() },
                    if record.lot.is_empty() { "N/A" } else { record.lot.as_str() },
                ),
            )?;
        }

        if !record.year_built.is_empty() {
            sheet.data_row("Year Built", &record.year_built)?;
        }
        if record.num_buildings > 0 {
            sheet.data_row("Number of Buildings", &record.num_buildings.to_string())?;
        }
        if record.num_units > 0 {
            sheet.data_row("Number of Units", &record.num_units.to_string())?;
        }
        if record.total_living_area > 0.0 {
            sheet.data_row(
                "Total Living Area",
                &format!("{} sq ft", group_thousands(record.total_living_area)),
            )?;
        }
        sheet.blank();
    }

    if sections.contains(SectionFlags::ZONING_LAND_USE) {
        sheet.section("ZONING & LAND USE")?;
        sheet.data_row("Current Zoning", &record.zoning)?;
        sheet.data_row("Land Use Description", &record.land_use)?;
        sheet.data_row("Land Use Code", &record.land_use_code)?;

        match zoning {
            Some(z) => {
                sheet.data_row("Future Land Use", &z.future_land_use)?;
                let flood = if z.fema_flood_zone.is_empty() {
                    record.fema_flood_zone.as_str()
                } else {
                    z.fema_flood_zone.as_str()
                };
                sheet.data_row("FEMA Flood Zone", flood)?;
            }
            None => {
                sheet.data_row("Future Land Use", "Requires separate lookup")?;
                let flood = if record.fema_flood_zone.is_empty() {
                    "Requires separate lookup"
                } else {
                    record.fema_flood_zone.as_str()
                };
                sheet.data_row("FEMA Flood Zone", flood)?;
            }
        }
        sheet.blank();
    }

    if let Some(z) = zoning {
        if sections.contains(SectionFlags::BUILDING_REQUIREMENTS) {
            sheet.section("BUILDING REQUIREMENTS")?;
            for (label, setback) in [
                ("Setback - Front", z.setbacks.front),
                ("Setback - Rear", z.setbacks.rear),
                ("Setback - Side", z.setbacks.side),
                ("Setback - Street Side", z.setbacks.street_side),
            ] {
                let value = setback
                    .map(|ft| format!("{} ft", ft))
                    .unwrap_or_else(|| "TBD".to_string());
                sheet.data_row(label, &value)?;
            }
            sheet.data_row("Maximum Building Height", &z.max_height)?;
            sheet.data_row("Maximum Lot Coverage", &z.max_coverage)?;
            sheet.blank();
        }

        if sections.contains(SectionFlags::PARKING_REQUIREMENTS) {
            sheet.section("PARKING REQUIREMENTS")?;
            sheet.data_row("Standard Parking", &z.parking_standard)?;
            sheet.data_row("Bicycle Parking", &z.bicycle_parking)?;
            let accessible = if z.accessible_parking.is_empty() {
                "Per ADA/FBC"
            } else {
                z.accessible_parking.as_str()
            };
            sheet.data_row("Accessible Parking", accessible)?;
            sheet.blank();
        }
    }

    if sections.contains(SectionFlags::ASSESSMENT_VALUES) {
        sheet.section("ASSESSMENT VALUES")?;
        sheet.money_row("Assessed Land Value", record.assessed_land)?;
        sheet.money_row("Assessed Building Value", record.assessed_building)?;
        sheet.money_row("Total Assessed Value", record.assessed_total)?;
        if record.market_value > 0.0 {
            sheet.money_row("Market Value", record.market_value)?;
        }
        sheet.blank();
    }

    if sections.contains(SectionFlags::SALES_HISTORY) && record.has_sale() {
        sheet.section("SALES HISTORY")?;
        sheet.data_row("Most Recent Sale Date", &record.sale_date)?;
        sheet.money_row("Most Recent Sale Amount", record.sale_amount)?;
        sheet.blank();
    }

    if sections.contains(SectionFlags::LINKS_REFERENCES) {
        sheet.section("LINKS & REFERENCES")?;
        if !record.parcel_link.is_empty() {
            sheet.data_row("Property Appraiser Link", &record.parcel_link)?;
        }
        if let Some(link) = municode_link(record.county.name(), &record.city) {
            sheet.data_row("Municipal Code", link)?;
        }
        sheet.data_row(
            "Source",
            &format!(
                "Property data from {} County property appraiser GIS services",
                record.county.name()
            ),
        )?;
        if let Some(z) = zoning {
            let jurisdiction = if z.jurisdiction.is_empty() {
                record.county.name()
            } else {
                z.jurisdiction.as_str()
            };
            sheet.data_row(
                "Zoning Source",
                &format!("Municode - {} Land Development Code", jurisdiction),
            )?;
        }
    }

    sheet.blank();
    let disclaimer_row = sheet.row + 1;
    sheet.ws.merge_range(
        disclaimer_row,
        0,
        disclaimer_row,
        1,
        "DISCLAIMER: This report is for informational purposes only. Property and \
         zoning information should be verified with the appropriate jurisdiction.",
        &formats.disclaimer,
    )?;

    workbook.save(output_path)?;

    tracing::info!(path = %output_path.display(), "report written");
    Ok(output_path.to_path_buf())
}
