use ndarray::{Array3, ArrayD};

use crate::container::Container;
use crate::rdf::Result;
use crate::region::{self, require, ListModeRegion, Region, Selection, SinglesRegion};

use super::RdfFile;

impl<C: Container> RdfFile<C> {
    /// Select the list-mode stream and record the number of singles samples
    pub fn initialise_listmode_data(&mut self) -> Result<Option<ListModeRegion>> {
        let region = region::initialise_listmode(&self.container, &self.classification)?;
        if let Some(r) = &region {
            self.num_singles_samples = r.num_singles_samples;
        }
        Ok(region)
    }

    /// Select the singles samples and record how many are valid
    pub fn initialise_singles_data(&mut self) -> Result<Option<SinglesRegion>> {
        let region = region::initialise_singles(&self.container, &self.classification)?;
        if let Some(r) = &region {
            self.num_singles_samples = r.num_samples;
        }
        Ok(region)
    }

    /// Select one sinogram view, numbered from 1 to half the detectors per ring
    pub fn initialise_proj_data(&mut self, view: u32) -> Result<Option<Region>> {
        let num_views = self.scanner.scanner.num_detectors_per_ring / 2;
        region::initialise_sinogram(&self.container, &self.classification, num_views, view)
    }

    /// Select one geometric correction slice, numbered from 1
    pub fn initialise_geo_factors_data(&mut self, slice: u32) -> Result<Option<Region>> {
        region::initialise_geo_factors(&self.container, &self.classification, slice)
    }

    /// Select the crystal efficiency factors
    pub fn initialise_efficiency_factors(&mut self) -> Result<Option<Region>> {
        region::initialise_efficiency(&self.container, &self.classification)
    }

    /// Copy `buffer.len()` raw list-mode bytes starting at `offset`
    pub fn read_list_data(
        &self,
        region: &ListModeRegion,
        offset: usize,
        buffer: &mut [u8],
    ) -> Result<()> {
        require(self.is_list_file(), "list-mode")?;
        region::read_list_data(&self.container, region, offset, buffer)
    }

    /// Read a sinogram view in logical `(NZ, NY, NX)` order
    pub fn read_sinogram(&self, region: &Region, selection: &Selection) -> Result<Array3<u8>> {
        require(self.is_sino_file(), "sinogram")?;
        region::read_sinogram(&self.container, region, selection)
    }

    /// Read a geometric correction slice
    pub fn read_geometric_factors(
        &self,
        region: &Region,
        selection: &Selection,
    ) -> Result<ArrayD<u32>> {
        require(self.is_geo_file(), "geometry")?;
        region::read_geometric_factors(&self.container, region, selection)
    }

    /// Read the crystal efficiency factors
    pub fn read_efficiency_factors(
        &self,
        region: &Region,
        selection: &Selection,
    ) -> Result<ArrayD<f32>> {
        require(self.is_norm_file(), "normalisation")?;
        region::read_efficiency_factors(&self.container, region, selection)
    }

    /// Read one singles sample, numbered from 1
    pub fn read_singles(
        &self,
        region: &SinglesRegion,
        sample: u32,
        selection: &Selection,
    ) -> Result<ArrayD<u32>> {
        require(
            self.is_list_file() || self.is_sino_file(),
            "list-mode or sinogram",
        )?;
        region::read_singles(&self.container, region, sample, selection)
    }
}
