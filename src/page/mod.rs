// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! Controllers for the two pages: the country listing and a single
//! country's details. Neither lets an error escape; failures become messages
//! for the views.

pub(crate) mod detail;
pub(crate) mod listing;
